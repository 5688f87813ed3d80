use thiserror::Error;

use crate::mutation::{BulkEditError, ImportError};
use crate::storage::StorageError;

/// Errors from content store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("import rejected: {0}")]
    Import(#[from] ImportError),
    #[error("bulk edit rejected: {0}")]
    BulkEdit(#[from] BulkEditError),
    #[error("page `{0}` not found")]
    PageNotFound(String),
    #[error("page index {0} out of range")]
    PageIndex(usize),
    #[error("`{0}` has no courses of its own")]
    NoCourses(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
