use std::collections::HashMap;

use crate::storage::domain::key_value_store::{KeyValueStore, StorageError};

/// Process-local key-value store backed by a `HashMap`.
///
/// Nothing survives the process. Writes can be made to fail on demand so
/// callers can exercise their storage-error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with a raw value, as if a previous session had written it.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// When enabled, every `set` returns `StorageError::Unavailable` and
    /// leaves the entries untouched.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!(
                "write to '{key}' rejected"
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
