//! In-memory store

use rustc_hash::FxHashMap;

use super::{SnapshotStore, StorageError};

/// Snapshot store that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one document.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Borrow the document stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}
