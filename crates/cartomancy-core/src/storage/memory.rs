//! In-process key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::StoreError;

/// Volatile store backed by a `HashMap`, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|e| StoreError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
