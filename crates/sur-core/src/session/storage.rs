//! Durable key-value slot.
//!
//! The session store mirrors its history into one named text slot. The
//! mechanism behind the slot is a collaborator: a JSON file in production,
//! [`MemoryStore`] in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, SurError};

/// A string-keyed text store.
///
/// Operations are synchronous; the values are small and every write is a
/// best-effort mirror of in-memory state.
pub trait KeyValueStore: Send + Sync {
    /// Returns the text stored under `key`, or `None` if the key was never written.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the text stored under `key`.
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| SurError::internal(format!("memory store poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SurError::internal(format!("memory store poisoned: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.store("k", "v1").unwrap();
        store.store("k", "v2").unwrap();

        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_with_entry() {
        let store = MemoryStore::with_entry("k", "[]");
        assert_eq!(store.load("k").unwrap().as_deref(), Some("[]"));
    }
}
