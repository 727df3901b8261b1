//! Storage traits and error types
//!
//! This module defines the trait interface for dataset backends and
//! associated error types.

use crate::storage::BookCollection;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset not found: {0}")]
    NotFound(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for dataset backend implementations
pub trait Storage {
    /// Writes the whole collection, replacing any previous dataset
    ///
    /// Readers observe either the previous dataset or the complete new one.
    fn save(&self, collection: &BookCollection) -> StorageResult<()>;

    /// Reads the whole collection back
    fn load(&self) -> StorageResult<BookCollection>;
}
