//! Durable key-value storage behind the dashboard store.
//!
//! The store never talks to a backend directly; it goes through
//! [`StoragePort`], so the quota-exhaustion degrade path can be exercised
//! against an in-memory backend in tests and the file backend can be
//! swapped without touching store logic.

pub mod file;
pub mod memory;

pub use self::file::FileStorage;
pub use self::memory::MemoryStorage;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend has no room for the value. The store reacts by
    /// degrading to a minimal snapshot instead of failing the mutation.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Minimal synchronous key-value port: get, set, remove.
///
/// Values are opaque strings; the store serializes its own envelope.
/// Writes are best-effort from the caller's point of view; the error
/// only tells the store how to degrade.
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// A mutable borrow of a port is itself a port, so a backend can outlive
/// the store borrowing it (the store under test, the admin binary's
/// purge path).
impl<T: StoragePort + ?Sized> StoragePort for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
