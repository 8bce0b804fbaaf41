//! Area polygons around real Las Vegas / Henderson landmarks.
//!
//! Corner coordinates sourced from OpenStreetMap via Overpass API.

#![allow(dead_code)]

use custom_model::{AreaFeature, ConditionalClause, CustomModel, Polygon};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Strip corridor (Mandalay Bay to Encore)
// ============================================================================

pub const STRIP_CORNERS: &[Location] = &[
    Location::new("Mandalay Bay", 36.0909, -115.1761),
    Location::new("Encore at Wynn", 36.1289345, -115.1653620),
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
];

// ============================================================================
// Airport (Harry Reid International)
// ============================================================================

pub const AIRPORT_CORNERS: &[Location] = &[
    Location::new("Terminal 1", 36.0800, -115.1522),
    Location::new("Terminal 3", 36.0744, -115.1617),
    Location::new("South Runway", 36.0689, -115.1450),
    Location::new("Cargo Road", 36.0810, -115.1390),
];

// ============================================================================
// Henderson
// ============================================================================

pub const HENDERSON_CORNERS: &[Location] = &[
    Location::new("Green Valley Ranch", 36.0107, -115.0799),
    Location::new("The District", 36.0158, -115.0866),
    Location::new("Sunset Station", 36.0627, -115.0491),
    Location::new("Henderson Executive Airport", 35.9729, -115.1345),
];

/// Builds a closed polygon ring through `corners`.
pub fn closed_ring(corners: &[Location]) -> Polygon {
    let mut points: Vec<(f64, f64)> = corners.iter().map(Location::coords).collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    Polygon::new(points)
}

pub fn strip_area() -> AreaFeature {
    AreaFeature::new(closed_ring(STRIP_CORNERS)).with_id("strip")
}

pub fn airport_area() -> AreaFeature {
    AreaFeature::new(closed_ring(AIRPORT_CORNERS)).with_id("airport")
}

pub fn henderson_area() -> AreaFeature {
    AreaFeature::new(closed_ring(HENDERSON_CORNERS)).with_id("henderson")
}

/// Server-side car profile: slows the Strip, avoids ferries, caps the airport.
pub fn server_car_model() -> CustomModel {
    CustomModel::new()
        .with_distance_influence(70.0)
        .with_speed_factor(ConditionalClause::if_then("in_strip", 0.7))
        .with_max_speed(ConditionalClause::if_then("in_airport", 40.0))
        .with_priority(ConditionalClause::if_then("road_environment == FERRY", 0.1))
        .with_area("strip", strip_area())
        .with_area("airport", airport_area())
}

/// Server-side truck profile with a fallback speed floor.
pub fn server_truck_model() -> CustomModel {
    server_car_model()
        .with_distance_influence(100.0)
        .with_max_speed_fallback(80.0)
        .with_priority(ConditionalClause::if_then("max_height < 4", 0.0))
}
