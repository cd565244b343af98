//! Memoized table loading.
//!
//! A selection's table is immutable for the duration of an analysis
//! session, so repeated identical selections skip the file read entirely.
//! The cache hands out shared [`Arc`] tables; a changed selection simply
//! loads fresh and the previous result is dropped with its last reference.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use store_map_landmark_models::LandmarkTable;

use crate::DatasetError;
use crate::config::DataConfig;
use crate::loader;
use crate::selection::Selection;

/// Cache of loaded landmark tables keyed by selection.
pub struct TableCache {
    config: DataConfig,
    entries: Mutex<BTreeMap<Selection, Arc<LandmarkTable>>>,
}

impl TableCache {
    /// Creates an empty cache over a data layout.
    #[must_use]
    pub const fn new(config: DataConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// The data layout this cache loads from.
    #[must_use]
    pub const fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Returns the table for a selection, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the selection cannot be resolved or its
    /// file fails to load. Failures are not cached; a retry re-reads the
    /// file.
    pub fn load(&self, selection: &Selection) -> Result<Arc<LandmarkTable>, DatasetError> {
        if let Some(table) = self.lock().get(selection) {
            log::debug!("Cache hit for {selection}");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(loader::load_table(&self.config, selection)?);
        self.lock().insert(selection.clone(), Arc::clone(&table));
        Ok(table)
    }

    /// Drops every cached table, forcing reloads.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<Selection, Arc<LandmarkTable>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const STORE_CSV: &str = "\
Landmark Name,Property Type,Landmark Latitude,Landmark Longitude
Zudio,retail,12.9698,77.6012
";

    fn config_rooted_at(root: &Path) -> DataConfig {
        DataConfig {
            data_root: root.to_path_buf(),
            ..DataConfig::default()
        }
    }

    fn store_selection() -> Selection {
        Selection::Store {
            city: "Bangalore".to_string(),
            store_code: 4501,
        }
    }

    #[test]
    fn repeated_selection_returns_same_table() {
        let dir = tempfile::tempdir().unwrap();
        let blr = dir.path().join("blr");
        fs::create_dir(&blr).unwrap();
        fs::write(blr.join("4501.csv"), STORE_CSV).unwrap();

        let cache = TableCache::new(config_rooted_at(dir.path()));
        let first = cache.load(&store_selection()).unwrap();
        let second = cache.load(&store_selection()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_survives_file_removal_once_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let blr = dir.path().join("blr");
        fs::create_dir(&blr).unwrap();
        let file = blr.join("4501.csv");
        fs::write(&file, STORE_CSV).unwrap();

        let cache = TableCache::new(config_rooted_at(dir.path()));
        let first = cache.load(&store_selection()).unwrap();
        fs::remove_file(&file).unwrap();
        let second = cache.load(&store_selection()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("blr")).unwrap();

        let cache = TableCache::new(config_rooted_at(dir.path()));
        assert!(cache.load(&store_selection()).is_err());

        // Creating the file afterwards makes the same selection loadable.
        fs::write(dir.path().join("blr").join("4501.csv"), STORE_CSV).unwrap();
        assert!(cache.load(&store_selection()).is_ok());
    }

    #[test]
    fn clear_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let blr = dir.path().join("blr");
        fs::create_dir(&blr).unwrap();
        fs::write(blr.join("4501.csv"), STORE_CSV).unwrap();

        let cache = TableCache::new(config_rooted_at(dir.path()));
        let first = cache.load(&store_selection()).unwrap();
        cache.clear();
        let second = cache.load(&store_selection()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
