#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset selection and loading.
//!
//! Each (city, store) or expansion-area selection resolves to exactly one
//! CSV file of landmarks. This crate owns the data layout configuration,
//! the typed selectors that resolve to file paths, the CSV-to-table loader,
//! and a memoized cache keyed by selection.

pub mod cache;
pub mod config;
pub mod discover;
pub mod loader;
pub mod selection;

pub use cache::TableCache;
pub use config::{CityConfig, DataConfig};
pub use discover::{list_expansion_areas, list_store_codes};
pub use loader::{load_table, load_table_from_reader};
pub use selection::Selection;

use thiserror::Error;

/// Errors that can occur while resolving or loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// I/O error (file open/read, directory listing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Config file parsing failed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// A required column is missing from the header row.
    #[error("landmark file is missing required column `{column}`")]
    MissingColumn {
        /// The canonical name of the column that was not found.
        column: String,
    },

    /// A cell that must be numeric could not be parsed.
    #[error("column `{column}` has non-numeric value `{value}` (row {row})")]
    InvalidValue {
        /// The column containing the bad cell.
        column: String,
        /// The raw cell contents.
        value: String,
        /// 1-based row number including the header row.
        row: usize,
    },

    /// A selection named a city the config does not know.
    #[error("unknown city `{0}`")]
    UnknownCity(String),
}
