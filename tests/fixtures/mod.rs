//! Test fixtures for custom-model.
//!
//! Provides realistic test data including:
//! - Area polygons around real Las Vegas / Henderson landmarks (from OpenStreetMap)
//! - Builders for server-side base models and request models

pub mod las_vegas_areas;

pub use las_vegas_areas::*;
