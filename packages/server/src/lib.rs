#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the store map application.
//!
//! Serves the REST API the dashboard frontend draws its charts from: store
//! analyses (classified landmarks, category counts, competitor subsets),
//! cross-area comparisons, and expansion area payloads. Tables are loaded
//! through the memoized dataset cache, so repeated selections of the same
//! store or area never re-read the file.

pub mod handlers;

use std::collections::BTreeMap;

use store_map_dataset::{DataConfig, TableCache};
use store_map_palette::MarkerColor;
use store_map_registry::RegistryError;
use store_map_registry_models::Store;

/// Shared application state.
pub struct AppState {
    /// Memoized landmark table loader.
    pub cache: TableCache,
    /// Store registry, filtered to the configured towns.
    pub stores: Vec<Store>,
    /// Marker color overrides parsed from the config.
    pub color_overrides: BTreeMap<String, MarkerColor>,
}

impl AppState {
    /// Loads the registry and builds the shared state for a data layout.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the store registry cannot be loaded.
    pub fn load(config: DataConfig) -> Result<Self, RegistryError> {
        let stores =
            store_map_registry::load_stores(&config.registry_file(), &config.registry_towns())?;
        let color_overrides = store_map_palette::parse_overrides(&config.colors);

        Ok(Self {
            cache: TableCache::new(config),
            stores,
            color_overrides,
        })
    }
}
