//! Merging a request-supplied custom model into a server-side one.
//!
//! The merge is asymmetric: the query model may only make routing more
//! conservative than the base model. It can raise the fallback max speed and
//! the distance influence, append clauses whose speed factor or priority
//! contribution is at most 1, and add areas under new names. Anything else is
//! rejected with a [`MergeError`] and neither input is touched.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::error::MergeError;
use crate::model::{CustomModel, DEFAULT_DISTANCE_INFLUENCE};
use crate::traits::{Area, Clause, ClauseCategory};

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// A query distance influence within this distance of the default counts as unset.
    pub distance_influence_tolerance: f64,
    /// Upper bound for speed factor and priority clause values in the query.
    ///
    /// Can only be tightened: values above 1 are treated as 1.
    pub max_factor: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            distance_influence_tolerance: 0.01,
            max_factor: 1.0,
        }
    }
}

/// Creates a new model from `base` merged with `query`, using default options.
pub fn merge<C, A>(
    base: &CustomModel<C, A>,
    query: &CustomModel<C, A>,
) -> Result<CustomModel<C, A>, MergeError>
where
    C: Clause,
    A: Area,
{
    merge_with(base, query, &MergeOptions::default())
}

pub fn merge_with<C, A>(
    base: &CustomModel<C, A>,
    query: &CustomModel<C, A>,
    options: &MergeOptions,
) -> Result<CustomModel<C, A>, MergeError>
where
    C: Clause,
    A: Area,
{
    // Work on a copy so a shared server-side model is never modified.
    let mut merged = base.clone();

    if let Some(requested) = query.max_speed_fallback {
        if let Some(floor) = merged.max_speed_fallback {
            if floor > requested {
                debug!(floor, requested, "rejecting lower max_speed_fallback");
                return Err(MergeError::FallbackLowered { floor, requested });
            }
        }
        merged.max_speed_fallback = Some(requested);
    }

    if (query.distance_influence - DEFAULT_DISTANCE_INFLUENCE).abs()
        > options.distance_influence_tolerance
    {
        let floor = merged.distance_influence;
        let requested = query.distance_influence;
        if floor > requested {
            debug!(floor, requested, "rejecting lower distance_influence");
            return Err(MergeError::DistanceInfluenceLowered { floor, requested });
        }
        merged.distance_influence = requested;
    }

    let max_factor = options.max_factor.min(1.0);
    check_factors(ClauseCategory::Priority, &query.priority, max_factor)?;
    check_factors(ClauseCategory::SpeedFactor, &query.speed_factor, max_factor)?;

    for category in [
        ClauseCategory::MaxSpeed,
        ClauseCategory::SpeedFactor,
        ClauseCategory::Priority,
    ] {
        merged
            .clauses_mut(category)
            .extend_from_slice(query.clauses(category));
    }

    for (name, area) in &query.areas {
        if merged.areas.contains_key(name) {
            debug!(area = %name, "rejecting duplicate area");
            return Err(MergeError::DuplicateArea { name: name.clone() });
        }
        merged.areas.insert(name.clone(), Arc::clone(area));
    }

    debug!(
        distance_influence = merged.distance_influence,
        max_speed_fallback = ?merged.max_speed_fallback,
        speed_factor = merged.speed_factor.len(),
        max_speed = merged.max_speed.len(),
        priority = merged.priority.len(),
        areas = merged.areas.len(),
        "merged custom model"
    );

    Ok(merged)
}

/// Merges every query against the same base in parallel.
///
/// Results are returned in query order. The base is only read.
pub fn merge_all<C, A>(
    base: &CustomModel<C, A>,
    queries: &[CustomModel<C, A>],
    options: &MergeOptions,
) -> Vec<Result<CustomModel<C, A>, MergeError>>
where
    C: Clause + Send + Sync,
    A: Area + Send + Sync,
{
    queries
        .par_iter()
        .map(|query| merge_with(base, query, options))
        .collect()
}

fn check_factors<C: Clause>(
    category: ClauseCategory,
    clauses: &[C],
    max: f64,
) -> Result<(), MergeError> {
    for clause in clauses {
        let value = clause.value();
        if value.is_nan() || value > max {
            debug!(%category, value, max, "rejecting factor above limit");
            return Err(MergeError::FactorTooLarge {
                category,
                value,
                max,
            });
        }
    }
    Ok(())
}
