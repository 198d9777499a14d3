use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use viewfinder_core::domain::prefs::SearchDefaults;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("unable to store preferences: {0}")]
    Store(#[from] io::Error),
    #[error("unable to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One JSON file of search-form defaults. Loading never fails: a missing or
/// unreadable file simply yields the built-in defaults.
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> SearchDefaults {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return SearchDefaults::default();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    /// Writes via a sibling temp file and rename; readers never observe a
    /// partial payload.
    pub fn store(&self, defaults: &SearchDefaults) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, serde_json::to_vec_pretty(defaults)?)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use viewfinder_core::types::date_range::DateRange;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load(), SearchDefaults::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, b"{not json").unwrap();
        let store = PrefsStore::new(path);
        assert_eq!(store.load(), SearchDefaults::default());
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));
        let defaults = SearchDefaults {
            date_range: DateRange::Month,
            max_results: 20,
            ..SearchDefaults::default()
        };
        store.store(&defaults).unwrap();
        assert_eq!(store.load(), defaults);
    }

    #[test]
    fn store_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::new(dir.path().join("nested/prefs.json"));
        store.store(&SearchDefaults::default()).unwrap();
        assert_eq!(store.load(), SearchDefaults::default());
    }
}
