//! Durable key/value storage for the persisted draft and the refresh signal.
//!
//! Implementations are shared between store instances (tabs) through an
//! `Arc<dyn KeyValueStorage>`; change notification is the store's job, not
//! the storage's.

pub mod file;
pub mod memory;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded: writing {requested} bytes with {available} available")]
    QuotaExceeded { requested: usize, available: usize },
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String key/value storage in the shape of browser local storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
