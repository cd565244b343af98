#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the store map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain types so the API contract can evolve independently of
//! the pipeline.

use serde::{Deserialize, Serialize};
use store_map_landmark_models::{
    CategoryCounts, Classification, ClassifiedLandmark, Coordinates, Landmark,
};
use store_map_palette::MarkerColor;
use store_map_registry_models::Store;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server considers itself healthy.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
}

/// A selectable city.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    /// Display name.
    pub name: String,
    /// Landmark directory under the data root.
    pub dir: String,
}

/// A store from the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStore {
    /// Store code.
    pub code: u32,
    /// Registry town.
    pub town: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl From<&Store> for ApiStore {
    fn from(store: &Store) -> Self {
        Self {
            code: store.code,
            town: store.town.clone(),
            latitude: store.coords.latitude,
            longitude: store.coords.longitude,
        }
    }
}

/// A landmark as returned by the API, with its marker color and, where the
/// pipeline ran, its distance and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLandmark {
    /// Landmark name.
    pub name: String,
    /// Category label.
    pub property_type: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Distance to the store in kilometers, when a store point exists.
    pub distance_km: Option<f64>,
    /// Standardized distance within the property-type group.
    pub z_score: Option<f64>,
    /// Hotspot/coldspot/neutral label, when classification ran.
    pub classification: Option<Classification>,
    /// Marker color for the map layer.
    pub color: MarkerColor,
}

impl ApiLandmark {
    /// Builds the API view of a classified landmark.
    #[must_use]
    pub fn from_classified(landmark: &ClassifiedLandmark, color: MarkerColor) -> Self {
        Self {
            name: landmark.name.clone(),
            property_type: landmark.property_type.to_string(),
            latitude: landmark.coords.latitude,
            longitude: landmark.coords.longitude,
            distance_km: Some(landmark.distance_km),
            z_score: landmark.z_score,
            classification: Some(landmark.classification),
            color,
        }
    }

    /// Builds the API view of an unclassified landmark (expansion areas,
    /// competitor subsets).
    #[must_use]
    pub fn from_landmark(landmark: &Landmark, color: MarkerColor) -> Self {
        Self {
            name: landmark.name.clone(),
            property_type: landmark.property_type.to_string(),
            latitude: landmark.coords.latitude,
            longitude: landmark.coords.longitude,
            distance_km: landmark.distance_km,
            z_score: None,
            classification: None,
            color,
        }
    }
}

/// Count of landmarks in one property type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategoryCount {
    /// Category label.
    pub property_type: String,
    /// Number of landmarks.
    pub count: u64,
}

impl ApiCategoryCount {
    /// Flattens a count map into API rows, in key order.
    #[must_use]
    pub fn list(counts: &CategoryCounts) -> Vec<Self> {
        counts
            .iter()
            .map(|(property_type, count)| Self {
                property_type: property_type.to_string(),
                count: *count,
            })
            .collect()
    }
}

/// Full chart payload for one store selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStoreAnalysis {
    /// The selected store.
    pub store: ApiStore,
    /// Z-score threshold the classification ran with.
    pub threshold: f64,
    /// Every landmark, classified, grouped by property type.
    pub landmarks: Vec<ApiLandmark>,
    /// Landmark counts per property type.
    pub counts: Vec<ApiCategoryCount>,
    /// The competitor subset for the competitor chart.
    pub competitors: Vec<ApiLandmark>,
}

/// Chart payload for one expansion area (no store point, so no distances
/// or classification).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiExpansionAnalysis {
    /// Area file stem.
    pub area: String,
    /// Mean landmark position, the map center; absent for empty areas.
    pub center: Option<Coordinates>,
    /// Every landmark in the area.
    pub landmarks: Vec<ApiLandmark>,
    /// Landmark counts per property type.
    pub counts: Vec<ApiCategoryCount>,
}

/// Query parameters accepted by the store analysis endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQueryParams {
    /// Overrides the default z-score threshold.
    pub threshold: Option<f64>,
}
