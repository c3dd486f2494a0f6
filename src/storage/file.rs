use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{StorageError, StoragePort};

/// File-backed storage: one JSON file per key under a directory.
///
/// Keys are fixed names chosen by this crate, so they map directly to
/// file names without escaping.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.entry_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match std::fs::write(self.entry_path(key), value) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::StorageFull => {
                debug!(key, "storage device full");
                Err(StorageError::QuotaExceeded)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path()).unwrap();
        assert!(storage.get("snapshot").unwrap().is_none());

        storage.set("snapshot", "{\"a\":1}").unwrap();
        assert_eq!(storage.get("snapshot").unwrap().as_deref(), Some("{\"a\":1}"));

        storage.remove("snapshot").unwrap();
        assert!(storage.get("snapshot").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path()).unwrap();
        storage.remove("never-written").unwrap();
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested).unwrap();
        assert!(storage.dir().exists());
    }
}
