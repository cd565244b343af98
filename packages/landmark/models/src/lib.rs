#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core landmark types shared across the store map system.
//!
//! A landmark is a point of interest near a retail store location. Every
//! analysis (distance, hotspot classification, category aggregation) operates
//! on the types defined here, so downstream crates agree on one vocabulary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A latitude/longitude pair in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, valid range [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, valid range [-180, 180].
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair without validating it.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks that the coordinate is within valid latitude/longitude range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if the latitude is outside
    /// [-90, 90] or the longitude is outside [-180, 180]. NaN fails both
    /// range checks.
    pub fn validate(self) -> Result<(), InvalidCoordinateError> {
        let lat_ok = self.latitude >= -90.0 && self.latitude <= 90.0;
        let lon_ok = self.longitude >= -180.0 && self.longitude <= 180.0;
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(InvalidCoordinateError {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Error returned when a coordinate falls outside valid latitude/longitude
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinateError {
    /// The offending latitude.
    pub latitude: f64,
    /// The offending longitude.
    pub longitude: f64,
}

impl std::fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "coordinate ({}, {}) out of range: expected latitude in [-90, 90] and longitude in [-180, 180]",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinateError {}

/// The category label attached to a landmark (e.g. "transportation",
/// "retail", "food").
///
/// This is an open vocabulary driven by the input data, so it is a
/// normalized string rather than a closed enum. Values are trimmed on
/// construction; comparison and ordering are byte-wise, which keeps
/// aggregate maps deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyType(String);

impl PropertyType {
    /// Creates a property type from raw input, trimming whitespace.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// Returns the category name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyType {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A point of interest near a store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    /// Human-readable landmark name.
    pub name: String,
    /// Category label.
    pub property_type: PropertyType,
    /// Landmark position.
    pub coords: Coordinates,
    /// Great-circle distance to the store in kilometers, if known.
    ///
    /// Populated either from a pre-existing `Distance` column in the input
    /// file or by the analytics pipeline's distance pass.
    pub distance_km: Option<f64>,
}

/// An ordered collection of landmarks for exactly one selection (one store
/// or one expansion area).
///
/// Immutable once loaded; rows are independent and insertion order carries
/// no meaning for analysis, but is preserved so output stays stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkTable {
    rows: Vec<Landmark>,
}

impl LandmarkTable {
    /// Wraps a list of landmarks as a table.
    #[must_use]
    pub const fn new(rows: Vec<Landmark>) -> Self {
        Self { rows }
    }

    /// Number of landmarks in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no landmarks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates the landmarks in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.rows.iter()
    }

    /// The landmarks in row order.
    #[must_use]
    pub fn rows(&self) -> &[Landmark] {
        &self.rows
    }

    /// Unique property types in order of first appearance.
    #[must_use]
    pub fn property_types(&self) -> Vec<PropertyType> {
        let mut types: Vec<PropertyType> = Vec::new();
        for row in &self.rows {
            if !types.contains(&row.property_type) {
                types.push(row.property_type.clone());
            }
        }
        types
    }
}

impl From<Vec<Landmark>> for LandmarkTable {
    fn from(rows: Vec<Landmark>) -> Self {
        Self::new(rows)
    }
}

impl<'a> IntoIterator for &'a LandmarkTable {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Hotspot/coldspot label for a landmark relative to same-type peers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Standardized distance above the threshold.
    Hotspot,
    /// Standardized distance below the negated threshold.
    Coldspot,
    /// Everything else, including degenerate groups.
    Neutral,
}

impl Classification {
    /// Labels a standardized distance against a threshold.
    ///
    /// Ties at exactly the threshold are neutral. NaN compares false on
    /// both sides, so undefined z-scores also land on neutral.
    #[must_use]
    pub fn from_z_score(z: f64, threshold: f64) -> Self {
        if z > threshold {
            Self::Hotspot
        } else if z < -threshold {
            Self::Coldspot
        } else {
            Self::Neutral
        }
    }
}

/// A landmark augmented with its standardized distance and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedLandmark {
    /// Human-readable landmark name.
    pub name: String,
    /// Category label.
    pub property_type: PropertyType,
    /// Landmark position.
    pub coords: Coordinates,
    /// Great-circle distance to the store in kilometers.
    pub distance_km: f64,
    /// Standardized distance within the landmark's property-type group.
    ///
    /// `None` for degenerate groups (size < 2 or zero variance).
    pub z_score: Option<f64>,
    /// Hotspot/coldspot/neutral label.
    pub classification: Classification,
}

/// Landmark counts per property type for one table.
///
/// Keys are unique; the sum of all counts equals the length of the source
/// table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<PropertyType, u64>);

impl CategoryCounts {
    /// Creates an empty count map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Increments the count for a property type.
    pub fn increment(&mut self, property_type: PropertyType) {
        *self.0.entry(property_type).or_insert(0) += 1;
    }

    /// Count for a single property type, zero if absent.
    #[must_use]
    pub fn get(&self, property_type: &PropertyType) -> u64 {
        self.0.get(property_type).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct property types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no property types were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(property type, count)` pairs in key order.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, PropertyType, u64> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CategoryCounts {
    type Item = (&'a PropertyType, &'a u64);
    type IntoIter = std::collections::btree_map::Iter<'a, PropertyType, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
