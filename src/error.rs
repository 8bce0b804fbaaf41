//! Error types for loading and merging custom models.

use thiserror::Error;

use crate::traits::ClauseCategory;

/// A query model tried to loosen a constraint enforced by the base model.
///
/// Every variant carries the offending value and, where one exists, the
/// floor it violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error("custom model in query can only use max_speed_fallback bigger or equal to {floor}, but was {requested}")]
    FallbackLowered { floor: f64, requested: f64 },

    #[error("custom model in query can only use distance_influence bigger or equal to {floor}, but was {requested}")]
    DistanceInfluenceLowered { floor: f64, requested: f64 },

    #[error("{category} factor cannot be larger than {max} but was {value}")]
    FactorTooLarge {
        category: ClauseCategory,
        value: f64,
        max: f64,
    },

    #[error("area {name} already exists")]
    DuplicateArea { name: String },
}

impl MergeError {
    /// Name of the model field the failed rule guards.
    pub fn field(&self) -> &'static str {
        match self {
            MergeError::FallbackLowered { .. } => "max_speed_fallback",
            MergeError::DistanceInfluenceLowered { .. } => "distance_influence",
            MergeError::FactorTooLarge { category, .. } => category.as_str(),
            MergeError::DuplicateArea { .. } => "areas",
        }
    }
}

/// A clause payload did not name exactly one of `if`, `else_if`, `else`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("clause needs one of 'if', 'else_if' or 'else'")]
    MissingSelector,

    #[error("clause can only use one of 'if', 'else_if' or 'else', found {found}")]
    AmbiguousSelector { found: usize },
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid custom model json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
