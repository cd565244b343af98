//! Typed dataset selectors.
//!
//! The original pipeline distinguished store analysis from expansion
//! analysis by patching directory names inside file path strings. Here a
//! selection is an explicit tagged value that resolves to its own
//! directory, and doubles as the memoization key for loaded tables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::DatasetError;
use crate::config::DataConfig;

/// One analyzable dataset: a store's surroundings or a candidate expansion
/// area.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum Selection {
    /// Landmarks around an existing store.
    Store {
        /// Configured city display name.
        city: String,
        /// Store code, which is also the CSV file stem.
        store_code: u32,
    },
    /// Landmarks in a candidate expansion area.
    Expansion {
        /// Area file stem (e.g. `"whitefield_expansion_areas"`).
        area: String,
    },
}

impl Selection {
    /// Resolves the selection to the CSV file it loads from.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnknownCity`] if a store selection names a
    /// city the config does not know.
    pub fn resolve(&self, config: &DataConfig) -> Result<PathBuf, DatasetError> {
        match self {
            Self::Store { city, store_code } => {
                let city_config = config
                    .city(city)
                    .ok_or_else(|| DatasetError::UnknownCity(city.clone()))?;
                Ok(config.city_dir(city_config).join(format!("{store_code}.csv")))
            }
            Self::Expansion { area } => Ok(config.expansion_path().join(format!("{area}.csv"))),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store { city, store_code } => write!(f, "store {store_code} in {city}"),
            Self::Expansion { area } => write!(f, "expansion area {area}"),
        }
    }
}
