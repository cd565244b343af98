#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Store registry loading and lookup.
//!
//! The registry is a row-oriented table mapping store code to town and
//! coordinates. The column headers (`StoreCode_x`, `Town_x`, `Latitude_x`,
//! `Longitude_x`) are merge artifacts of the upstream export and are the
//! on-disk contract, so they are matched verbatim. Rows outside the
//! configured town allow-list are skipped, not errors.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use store_map_registry_models::Store;

/// Errors that can occur while loading the store registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("registry is missing required column `{column}`")]
    MissingColumn {
        /// The column that was not found.
        column: String,
    },

    /// A cell that must be numeric could not be parsed.
    #[error("registry column `{column}` has non-numeric value `{value}` (row {row})")]
    InvalidValue {
        /// The column containing the bad cell.
        column: String,
        /// The raw cell contents.
        value: String,
        /// 1-based row number including the header row.
        row: usize,
    },
}

const CODE_COLUMN: &str = "StoreCode_x";
const TOWN_COLUMN: &str = "Town_x";
const LATITUDE_COLUMN: &str = "Latitude_x";
const LONGITUDE_COLUMN: &str = "Longitude_x";

/// Loads the store registry from a CSV file, keeping only rows whose town
/// is in `allowed_towns`.
///
/// # Errors
///
/// Returns [`RegistryError`] if the file cannot be read, a required column
/// is missing, or a kept row has a non-numeric code or coordinate.
pub fn load_stores(path: &Path, allowed_towns: &[String]) -> Result<Vec<Store>, RegistryError> {
    let file = File::open(path)?;
    let stores = load_stores_from_reader(file, allowed_towns)?;
    log::info!(
        "Loaded {} stores from {} ({} towns allowed)",
        stores.len(),
        path.display(),
        allowed_towns.len()
    );
    Ok(stores)
}

/// Loads the store registry from any CSV reader.
///
/// # Errors
///
/// Returns [`RegistryError`] if a required column is missing or a kept row
/// has a non-numeric code or coordinate.
pub fn load_stores_from_reader<R: Read>(
    reader: R,
    allowed_towns: &[String],
) -> Result<Vec<Store>, RegistryError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let code_idx = find_column(&headers, CODE_COLUMN)?;
    let town_idx = find_column(&headers, TOWN_COLUMN)?;
    let lat_idx = find_column(&headers, LATITUDE_COLUMN)?;
    let lon_idx = find_column(&headers, LONGITUDE_COLUMN)?;

    let mut stores = Vec::new();

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is row 1.
        let row = i + 2;

        let town = record.get(town_idx).unwrap_or("").trim();
        if !allowed_towns.iter().any(|t| t == town) {
            continue;
        }

        let code = parse_cell(&record, code_idx, CODE_COLUMN, row)?;
        let latitude = parse_cell(&record, lat_idx, LATITUDE_COLUMN, row)?;
        let longitude = parse_cell(&record, lon_idx, LONGITUDE_COLUMN, row)?;

        stores.push(Store {
            code,
            town: town.to_string(),
            coords: store_map_landmark_models::Coordinates::new(latitude, longitude),
        });
    }

    Ok(stores)
}

/// Finds a store by its registry code.
#[must_use]
pub fn find_store(stores: &[Store], code: u32) -> Option<&Store> {
    stores.iter().find(|store| store.code == code)
}

fn find_column(headers: &csv::StringRecord, column: &str) -> Result<usize, RegistryError> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| RegistryError::MissingColumn {
            column: column.to_string(),
        })
}

fn parse_cell<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> Result<T, RegistryError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| RegistryError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
        row,
    })
}
