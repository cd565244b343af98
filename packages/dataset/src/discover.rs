//! Dataset discovery: which stores and expansion areas exist on disk.

use std::path::Path;

use crate::DatasetError;
use crate::config::DataConfig;

const EXPANSION_SUFFIX: &str = "_expansion_areas";

/// Store codes available for a city, from the `<code>.csv` files in its
/// landmark directory. Sorted ascending.
///
/// Files whose stem is not an integer store code are skipped with a
/// warning.
///
/// # Errors
///
/// Returns [`DatasetError`] if the city is unknown or its directory cannot
/// be listed.
pub fn list_store_codes(config: &DataConfig, city: &str) -> Result<Vec<u32>, DatasetError> {
    let city_config = config
        .city(city)
        .ok_or_else(|| DatasetError::UnknownCity(city.to_string()))?;

    let mut codes = Vec::new();
    for stem in csv_stems(&config.city_dir(city_config))? {
        match stem.parse::<u32>() {
            Ok(code) => codes.push(code),
            Err(_) => log::warn!("Skipping non-store file {stem}.csv in {}", city_config.dir),
        }
    }

    codes.sort_unstable();
    Ok(codes)
}

/// Expansion area names, from the `*_expansion_areas.csv` files in the
/// expansion directory. Sorted alphabetically.
///
/// # Errors
///
/// Returns [`DatasetError`] if the expansion directory cannot be listed.
pub fn list_expansion_areas(config: &DataConfig) -> Result<Vec<String>, DatasetError> {
    let mut areas: Vec<String> = csv_stems(&config.expansion_path())?
        .into_iter()
        .filter(|stem| stem.ends_with(EXPANSION_SUFFIX))
        .collect();

    areas.sort_unstable();
    Ok(areas)
}

/// File stems of every `.csv` file directly under `dir`.
fn csv_stems(dir: &Path) -> Result<Vec<String>, DatasetError> {
    let mut stems = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "csv")
            && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
        {
            stems.push(stem.to_string());
        }
    }

    Ok(stems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_rooted_at(root: &Path) -> DataConfig {
        DataConfig {
            data_root: root.to_path_buf(),
            ..DataConfig::default()
        }
    }

    #[test]
    fn lists_store_codes_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let blr = dir.path().join("blr");
        fs::create_dir(&blr).unwrap();
        fs::write(blr.join("4502.csv"), "x").unwrap();
        fs::write(blr.join("4501.csv"), "x").unwrap();
        fs::write(blr.join("notes.txt"), "x").unwrap();
        fs::write(blr.join("README.csv"), "x").unwrap();

        let codes = list_store_codes(&config_rooted_at(dir.path()), "Bangalore").unwrap();
        assert_eq!(codes, vec![4501, 4502]);
    }

    #[test]
    fn unknown_city_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_store_codes(&config_rooted_at(dir.path()), "Chennai").unwrap_err();
        assert!(matches!(err, DatasetError::UnknownCity(_)));
    }

    #[test]
    fn lists_only_expansion_area_files() {
        let dir = tempfile::tempdir().unwrap();
        let locations = dir.path().join("locations");
        fs::create_dir(&locations).unwrap();
        fs::write(locations.join("whitefield_expansion_areas.csv"), "x").unwrap();
        fs::write(locations.join("hsr_expansion_areas.csv"), "x").unwrap();
        fs::write(locations.join("scratch.csv"), "x").unwrap();

        let areas = list_expansion_areas(&config_rooted_at(dir.path())).unwrap();
        assert_eq!(
            areas,
            vec!["hsr_expansion_areas", "whitefield_expansion_areas"]
        );
    }
}
