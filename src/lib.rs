//! custom-model core
//!
//! Routing cost profiles made of conditional clauses, scalar parameters and
//! named areas, plus the rules for layering a request model onto a
//! server-side one.

pub mod traits;
pub mod clause;
pub mod area;
pub mod model;
pub mod merge;
pub mod error;

pub use area::{AreaFeature, Polygon};
pub use clause::{ClauseKind, ConditionalClause};
pub use error::{ClauseError, MergeError, ModelError};
pub use merge::{merge, merge_all, merge_with, MergeOptions};
pub use model::{CustomModel, DEFAULT_DISTANCE_INFLUENCE, DEFAULT_HEADING_PENALTY, KEY};
pub use traits::{Area, Clause, ClauseCategory};
