//! The custom model value type.
//!
//! A custom model adjusts the routing cost of a profile: three ordered
//! clause lists (speed factor, max speed, priority), a few scalar
//! parameters and the named areas the clause conditions refer to.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::area::AreaFeature;
use crate::clause::ConditionalClause;
use crate::error::Result;
use crate::traits::{Area, Clause, ClauseCategory};

/// Key under which a custom model appears in profiles and request payloads.
pub const KEY: &str = "custom_model";

/// Default distance influence, derived from a cost for time of roughly
/// 25€/hour and for distance of 0.5€/km. Trucks usually want more.
pub const DEFAULT_DISTANCE_INFLUENCE: f64 = 70.0;

/// Routing-wide default heading penalty in seconds.
pub const DEFAULT_HEADING_PENALTY: f64 = 300.0;

/// Maps `-0.0` to `0.0` so numbers that compare equal render the same.
pub(crate) fn canonical_number(value: f64) -> f64 {
    value + 0.0
}

/// A user-customizable routing cost profile.
///
/// `Clone` is the copy constructor: clause lists and the area map are
/// duplicated, areas themselves are shared through `Arc` and never mutated.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomModel<C = ConditionalClause, A = AreaFeature> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_speed_fallback: Option<f64>,
    pub(crate) heading_penalty: f64,
    pub(crate) distance_influence: f64,
    pub(crate) speed_factor: Vec<C>,
    pub(crate) max_speed: Vec<C>,
    pub(crate) priority: Vec<C>,
    pub(crate) areas: BTreeMap<String, Arc<A>>,
}

impl<C, A> Default for CustomModel<C, A> {
    fn default() -> Self {
        Self {
            max_speed_fallback: None,
            heading_penalty: DEFAULT_HEADING_PENALTY,
            distance_influence: DEFAULT_DISTANCE_INFLUENCE,
            speed_factor: Vec::new(),
            max_speed: Vec::new(),
            priority: Vec::new(),
            areas: BTreeMap::new(),
        }
    }
}

// Written out so that `A` does not need to be `Clone`.
impl<C: Clone, A> Clone for CustomModel<C, A> {
    fn clone(&self) -> Self {
        Self {
            max_speed_fallback: self.max_speed_fallback,
            heading_penalty: self.heading_penalty,
            distance_influence: self.distance_influence,
            speed_factor: self.speed_factor.clone(),
            max_speed: self.max_speed.clone(),
            priority: self.priority.clone(),
            areas: self.areas.clone(),
        }
    }
}

impl<C, A> CustomModel<C, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_speed_fallback(&self) -> Option<f64> {
        self.max_speed_fallback
    }

    pub fn heading_penalty(&self) -> f64 {
        self.heading_penalty
    }

    pub fn distance_influence(&self) -> f64 {
        self.distance_influence
    }

    pub fn speed_factor(&self) -> &[C] {
        &self.speed_factor
    }

    pub fn max_speed(&self) -> &[C] {
        &self.max_speed
    }

    pub fn priority(&self) -> &[C] {
        &self.priority
    }

    /// Clause list for `category`.
    pub fn clauses(&self, category: ClauseCategory) -> &[C] {
        match category {
            ClauseCategory::SpeedFactor => &self.speed_factor,
            ClauseCategory::MaxSpeed => &self.max_speed,
            ClauseCategory::Priority => &self.priority,
        }
    }

    pub fn clauses_mut(&mut self, category: ClauseCategory) -> &mut Vec<C> {
        match category {
            ClauseCategory::SpeedFactor => &mut self.speed_factor,
            ClauseCategory::MaxSpeed => &mut self.max_speed,
            ClauseCategory::Priority => &mut self.priority,
        }
    }

    /// Areas keyed by name, iterated in name order.
    pub fn areas(&self) -> &BTreeMap<String, Arc<A>> {
        &self.areas
    }

    pub fn areas_mut(&mut self) -> &mut BTreeMap<String, Arc<A>> {
        &mut self.areas
    }

    pub fn area(&self, name: &str) -> Option<&A> {
        self.areas.get(name).map(Arc::as_ref)
    }

    /// Sets the speed used where no max speed clause matches.
    ///
    /// Expected to be positive. The value is not range checked here or on
    /// merge; a query may only raise an existing fallback.
    pub fn set_max_speed_fallback(&mut self, max_speed_fallback: Option<f64>) -> &mut Self {
        self.max_speed_fallback = max_speed_fallback;
        self
    }

    pub fn set_heading_penalty(&mut self, heading_penalty: f64) -> &mut Self {
        self.heading_penalty = heading_penalty;
        self
    }

    pub fn set_distance_influence(&mut self, distance_influence: f64) -> &mut Self {
        self.distance_influence = distance_influence;
        self
    }

    pub fn set_areas(&mut self, areas: BTreeMap<String, Arc<A>>) -> &mut Self {
        self.areas = areas;
        self
    }

    /// See [`CustomModel::set_max_speed_fallback`]: positive, not range checked.
    pub fn with_max_speed_fallback(mut self, max_speed_fallback: f64) -> Self {
        self.max_speed_fallback = Some(max_speed_fallback);
        self
    }

    pub fn with_heading_penalty(mut self, heading_penalty: f64) -> Self {
        self.heading_penalty = heading_penalty;
        self
    }

    pub fn with_distance_influence(mut self, distance_influence: f64) -> Self {
        self.distance_influence = distance_influence;
        self
    }

    pub fn with_speed_factor(mut self, clause: C) -> Self {
        self.speed_factor.push(clause);
        self
    }

    pub fn with_max_speed(mut self, clause: C) -> Self {
        self.max_speed.push(clause);
        self
    }

    pub fn with_priority(mut self, clause: C) -> Self {
        self.priority.push(clause);
        self
    }

    /// Adds or replaces the area stored under `name`.
    pub fn with_area(mut self, name: impl Into<String>, area: A) -> Self {
        self.areas.insert(name.into(), Arc::new(area));
        self
    }
}

impl<C: Clause, A: Area> CustomModel<C, A> {
    /// Canonical textual form of everything that affects routing.
    ///
    /// Used to check a model against stored results. Heading penalty is not
    /// part of it; areas render in name order.
    pub fn fingerprint(&self) -> String {
        self.to_string()
    }
}

impl<C: DeserializeOwned, A: DeserializeOwned> CustomModel<C, A> {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<C: Serialize, A: Serialize> CustomModel<C, A> {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<C: Clause, A: Area> fmt::Display for CustomModel<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distance_influence={}",
            canonical_number(self.distance_influence)
        )?;
        f.write_str("|speed_factor=")?;
        write_clauses(f, &self.speed_factor)?;
        f.write_str("|max_speed=")?;
        write_clauses(f, &self.max_speed)?;
        match self.max_speed_fallback {
            Some(fallback) => write!(f, "|max_speed_fallback={}", canonical_number(fallback))?,
            None => f.write_str("|max_speed_fallback=null")?,
        }
        f.write_str("|priority=")?;
        write_clauses(f, &self.priority)?;
        f.write_str("|areas={")?;
        for (i, (name, area)) in self.areas.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {}", name, area)?;
        }
        f.write_str("}")
    }
}

fn write_clauses<C: Clause>(f: &mut fmt::Formatter<'_>, clauses: &[C]) -> fmt::Result {
    f.write_str("[")?;
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", clause)?;
    }
    f.write_str("]")
}
