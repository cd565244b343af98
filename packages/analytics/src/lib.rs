#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Landmark analytics pipeline.
//!
//! Turns a raw landmark table into the derived views every chart consumes:
//! per-landmark geodesic distance to the store, hotspot/coldspot labels from
//! per-category standardized distances, and aggregate counts by property
//! type. All operations are pure functions over an immutable table; the
//! rendering layer maps the results to marker colors and chart slices.

pub mod aggregate;
pub mod distance;
pub mod hotspot;

pub use aggregate::{
    ComparisonMatrix, aggregate_counts, compare_areas, filter_competitors, table_center,
};
pub use distance::compute_distances;
pub use hotspot::{ClassifyOptions, DEFAULT_Z_THRESHOLD, classify};

use store_map_landmark_models::InvalidCoordinateError;
use thiserror::Error;

/// Errors that can occur in the analytics pipeline.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A coordinate fell outside valid latitude/longitude range.
    #[error("invalid coordinate for {subject}: {source}")]
    InvalidCoordinate {
        /// What carried the bad coordinate ("store location" or a landmark
        /// name).
        subject: String,
        /// The range violation.
        source: InvalidCoordinateError,
    },

    /// A landmark is missing its distance, so classification cannot run.
    #[error("missing value in column `Distance` for landmark `{name}`")]
    MissingDistance {
        /// The landmark without a distance.
        name: String,
    },
}
