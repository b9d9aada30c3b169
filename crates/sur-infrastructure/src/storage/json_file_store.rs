//! File-backed key-value slots.

use std::path::PathBuf;

use sur_core::error::{Result, SurError};
use sur_core::session::KeyValueStore;

use super::atomic::{read_optional, write_atomic};

/// [`KeyValueStore`] keeping one `<key>.json` file per key in a directory.
///
/// Values are stored verbatim; callers decide the encoding.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that backs `key`.
    ///
    /// # Errors
    ///
    /// Returns `SurError::Validation` for keys that are empty or could
    /// escape the directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SurError::validation(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(key)?)
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "Stored slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.load("odia_sur_history").unwrap(), None);
        store.store("odia_sur_history", "[]").unwrap();

        assert_eq!(store.load("odia_sur_history").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("data/odia_sur_history.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = JsonFileStore::new("/tmp");
        assert!(store.path_for("../escape").unwrap_err().is_validation());
        assert!(store.path_for("").unwrap_err().is_validation());
        assert!(store.path_for("a/b").is_err());
    }
}
