use std::collections::HashMap;

use super::{StorageError, StoragePort};

/// In-memory storage backend.
///
/// Used as the default in-process backend and as the test double for the
/// quota-degrade path: `with_quota` bounds the total stored bytes the way
/// a browser's local storage bounds an origin.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    max_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the total bytes (keys + values) this backend will hold.
    pub fn with_quota(max_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_bytes: Some(max_bytes),
        }
    }

    /// Total bytes currently held, counting keys and values.
    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(max) = self.max_bytes {
            let existing = self.entries.get(key).map(|v| v.len() + key.len()).unwrap_or(0);
            let projected = self.used_bytes() - existing + key.len() + value.len();
            if projected > max {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
