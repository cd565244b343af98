#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Store registry row types.
//!
//! A store is a fixed retail location identified by an integer code. The
//! registry spreadsheet maps store codes to a town and coordinates; these
//! types are what the loader produces after filtering to the configured
//! town allow-list.

use serde::{Deserialize, Serialize};
use store_map_landmark_models::Coordinates;

/// One store from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Store code (the registry's integer identifier, also the landmark
    /// file name for the store's city directory).
    pub code: u32,
    /// Town the store belongs to, as spelled in the registry.
    pub town: String,
    /// Store position.
    pub coords: Coordinates,
}
