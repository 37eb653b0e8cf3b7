//! Error types for core module
//!
//! Errors from the persistence and configuration layers. Callers log these
//! and fall back to defaults; none of them stop a game.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage file I/O error
    #[error("Storage I/O error: {0}")]
    StorageIo(#[from] std::io::Error),

    /// Stored value or config serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage key that cannot be used as a file name
    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
