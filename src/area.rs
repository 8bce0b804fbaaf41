//! Default area type: a GeoJSON-style polygon feature.
//!
//! Areas are referenced by name from clause conditions. Point-in-polygon
//! testing happens in the evaluator; here an area is just stored geometry
//! with a stable rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::canonical_number;
use crate::traits::Area;

/// A polygon as decoded coordinates: an outer ring plus optional holes.
///
/// Stores latitude/longitude points directly. The GeoJSON wire form uses
/// `[lng, lat]` pairs and is converted at the serde boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolygon", into = "RawPolygon")]
pub struct Polygon {
    points: Vec<(f64, f64)>,
    holes: Vec<Vec<(f64, f64)>>,
}

impl Polygon {
    /// Creates a polygon from its outer ring.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self {
            points,
            holes: Vec::new(),
        }
    }

    /// Adds an interior ring excluded from the area.
    pub fn with_hole(mut self, hole: Vec<(f64, f64)>) -> Self {
        self.holes.push(hole);
        self
    }

    /// Returns a reference to the outer ring points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn holes(&self) -> &[Vec<(f64, f64)>] {
        &self.holes
    }

    /// Consumes the polygon and returns all rings, outer ring first.
    pub fn into_rings(self) -> Vec<Vec<(f64, f64)>> {
        let mut rings = Vec::with_capacity(1 + self.holes.len());
        rings.push(self.points);
        rings.extend(self.holes);
        rings
    }
}

fn write_ring(f: &mut fmt::Formatter<'_>, ring: &[(f64, f64)]) -> fmt::Result {
    f.write_str("[")?;
    for (i, (lat, lng)) in ring.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "({}, {})", canonical_number(*lat), canonical_number(*lng))?;
    }
    f.write_str("]")
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ring(f, &self.points)?;
        if !self.holes.is_empty() {
            f.write_str(" holes=[")?;
            for (i, hole) in self.holes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_ring(f, hole)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct RawPolygon {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl TryFrom<RawPolygon> for Polygon {
    type Error = String;

    fn try_from(raw: RawPolygon) -> Result<Self, Self::Error> {
        if raw.kind != "Polygon" {
            return Err(format!("unsupported geometry type {}", raw.kind));
        }
        let mut rings = raw
            .coordinates
            .into_iter()
            .map(|ring| ring.into_iter().map(|[lng, lat]| (lat, lng)).collect::<Vec<_>>());
        let points = match rings.next() {
            Some(outer) if !outer.is_empty() => outer,
            _ => return Err("polygon needs a non-empty outer ring".to_string()),
        };
        let holes: Vec<Vec<(f64, f64)>> = rings.collect();
        if holes.iter().any(Vec::is_empty) {
            return Err("polygon hole cannot be empty".to_string());
        }
        Ok(Polygon { points, holes })
    }
}

impl From<Polygon> for RawPolygon {
    fn from(polygon: Polygon) -> Self {
        RawPolygon {
            kind: "Polygon".to_string(),
            coordinates: polygon
                .into_rings()
                .into_iter()
                .map(|ring| ring.into_iter().map(|(lat, lng)| [lng, lat]).collect())
                .collect(),
        }
    }
}

/// A GeoJSON `Feature` wrapping a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct AreaFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    geometry: Polygon,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, serde_json::Value>,
}

impl AreaFeature {
    pub fn new(geometry: Polygon) -> Self {
        Self {
            id: None,
            geometry,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn geometry(&self) -> &Polygon {
        &self.geometry
    }

    pub fn properties(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.properties
    }
}

impl Area for AreaFeature {}

impl fmt::Display for AreaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{{id: {:?}, geometry: {}", id, self.geometry)?,
            None => write!(f, "{{id: null, geometry: {}", self.geometry)?,
        }
        if !self.properties.is_empty() {
            // BTreeMap keeps property order stable.
            f.write_str(", properties: {")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}: {}", key, value)?;
            }
            f.write_str("}")?;
        }
        f.write_str("}")
    }
}
