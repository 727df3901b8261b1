//! Output error types

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while rendering the site
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
