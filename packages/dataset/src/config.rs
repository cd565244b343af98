//! Data layout configuration.
//!
//! The layout (city directories, registry file, expansion directory,
//! competitor list, marker color overrides) is a TOML document with a
//! complete built-in default that mirrors the original deployment, so the
//! binaries run against a checked-out data directory with no config file
//! at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::DatasetError;

/// One analyzable city: display name, landmark directory, and the town
/// spelling used by the store registry (they differ, e.g. "Bangalore" vs
/// "Bengaluru").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityConfig {
    /// Display name used in selections and the API.
    pub name: String,
    /// Directory under `data_root` holding `<store_code>.csv` files.
    pub dir: String,
    /// Town spelling in the registry's `Town_x` column.
    pub registry_town: String,
}

/// The full data layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root directory all other paths resolve under.
    pub data_root: PathBuf,
    /// Store registry file, relative to `data_root`.
    pub registry_path: PathBuf,
    /// Directory of expansion area files, relative to `data_root`.
    pub expansion_dir: String,
    /// Cities that can be selected.
    pub cities: Vec<CityConfig>,
    /// Competitor landmark names for the competitor chart.
    pub competitors: Vec<String>,
    /// Marker color overrides per property type, by color name.
    pub colors: BTreeMap<String, String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            registry_path: PathBuf::from("Store_Info_Latitude_Longitude.csv"),
            expansion_dir: "locations".to_string(),
            cities: vec![
                CityConfig {
                    name: "Bangalore".to_string(),
                    dir: "blr".to_string(),
                    registry_town: "Bengaluru".to_string(),
                },
                CityConfig {
                    name: "Mysore".to_string(),
                    dir: "mys".to_string(),
                    registry_town: "Mysore".to_string(),
                },
            ],
            competitors: vec![
                "Reliance Trends".to_string(),
                "Zudio".to_string(),
                "Westside".to_string(),
            ],
            colors: BTreeMap::new(),
        }
    }
}

impl DataConfig {
    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be read or is not valid
    /// TOML.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        log::info!("Loaded data config from {}", path.display());
        Ok(config)
    }

    /// Loads the config file if it exists, otherwise the built-in default.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, DatasetError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!(
                "No config at {}, using built-in data layout",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Looks up a configured city by display name.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&CityConfig> {
        self.cities.iter().find(|city| city.name == name)
    }

    /// Registry town spellings for every configured city, the registry
    /// loader's allow-list.
    #[must_use]
    pub fn registry_towns(&self) -> Vec<String> {
        self.cities
            .iter()
            .map(|city| city.registry_town.clone())
            .collect()
    }

    /// Absolute path of the store registry file.
    #[must_use]
    pub fn registry_file(&self) -> PathBuf {
        self.data_root.join(&self.registry_path)
    }

    /// Absolute path of a city's landmark directory.
    #[must_use]
    pub fn city_dir(&self, city: &CityConfig) -> PathBuf {
        self.data_root.join(&city.dir)
    }

    /// Absolute path of the expansion area directory.
    #[must_use]
    pub fn expansion_path(&self) -> PathBuf {
        self.data_root.join(&self.expansion_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_deployment() {
        let config = DataConfig::default();
        assert_eq!(config.cities.len(), 2);
        assert_eq!(config.city("Bangalore").unwrap().dir, "blr");
        assert_eq!(
            config.city("Bangalore").unwrap().registry_town,
            "Bengaluru"
        );
        assert!(config.city("Chennai").is_none());
        assert_eq!(config.competitors.len(), 3);
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config: DataConfig = toml::from_str(
            r#"
data_root = "/srv/store-data"
competitors = ["Zudio"]

[colors]
retail = "darkblue"
"#,
        )
        .unwrap();
        assert_eq!(config.data_root, PathBuf::from("/srv/store-data"));
        assert_eq!(config.competitors, vec!["Zudio"]);
        // Unspecified sections keep their defaults.
        assert_eq!(config.expansion_dir, "locations");
        assert_eq!(config.cities.len(), 2);
        assert_eq!(config.colors.get("retail").unwrap(), "darkblue");
    }

    #[test]
    fn registry_towns_follow_city_list() {
        let config = DataConfig::default();
        assert_eq!(config.registry_towns(), vec!["Bengaluru", "Mysore"]);
    }
}
