//! Snapshot storage
//!
//! Durable key-value storage for trip snapshots. The trip only ever reads
//! and writes whole documents under a single key.

use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a snapshot store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("failed to access snapshot storage: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Durable key-value storage for serialised snapshots.
#[automock]
pub trait SnapshotStore {
    /// Read the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any earlier document.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the document stored under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
