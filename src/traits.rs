//! Collaborator contracts for custom model contents.
//!
//! Clause conditions and area geometry are evaluated elsewhere. This crate
//! only needs the narrow surface below; concrete apps can implement these
//! traits for their own clause and geometry types.

use std::fmt;

/// A conditional rule (condition + numeric value) consumed by the cost evaluator.
///
/// `Display` must be stable and unambiguous: it feeds the model fingerprint,
/// so free-form text such as conditions should be quoted or escaped.
pub trait Clause: Clone + PartialEq + fmt::Display {
    fn value(&self) -> f64;
}

/// A named geometry region referenced from clause conditions.
///
/// The name lives outside, as the key in the model's area map. Areas are
/// treated as immutable once inserted into a model.
pub trait Area: PartialEq + fmt::Display {}

/// The three clause lists of a custom model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseCategory {
    SpeedFactor,
    MaxSpeed,
    Priority,
}

impl ClauseCategory {
    /// Whether clauses of this category contributed by a query must stay `<= 1`.
    pub fn bounded_by_one(self) -> bool {
        matches!(self, ClauseCategory::SpeedFactor | ClauseCategory::Priority)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClauseCategory::SpeedFactor => "speed_factor",
            ClauseCategory::MaxSpeed => "max_speed",
            ClauseCategory::Priority => "priority",
        }
    }
}

impl fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
