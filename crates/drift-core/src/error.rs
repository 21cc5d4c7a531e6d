//! Core error types for drift-core.
//!
//! Errors are grouped per concern with thiserror. Most of the library
//! degrades instead of failing (empty draws, unavailable storage), so these
//! types mainly surface from catalog loading, configuration and the storage
//! backends themselves.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for drift-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog loading or validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Share/export errors
    #[error("Share error: {0}")]
    Share(#[from] ShareError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading the prompt catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog source could not be parsed
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// The catalog file could not be read
    #[error("Failed to read catalog from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two prompts share an id
    #[error("Duplicate prompt id: {0}")]
    DuplicateId(String),

    /// A prompt has an empty id
    #[error("Prompt at position {0} has an empty id")]
    EmptyId(usize),

    /// A prompt has empty text
    #[error("Prompt '{0}' has empty text")]
    EmptyText(String),
}

/// Errors raised by key-value storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No storage backend exists in this execution context
    #[error("Persistent storage is not available")]
    Unavailable,

    /// Failed to read a key
    #[error("Failed to read '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a key
    #[error("Failed to write '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be mapped to the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend's lock was poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to determine the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors raised by share targets and clipboards.
#[derive(Error, Debug)]
pub enum ShareError {
    /// The native share sheet failed for a reason other than the user declining
    #[error("Share failed: {0}")]
    Failed(String),

    /// The clipboard could not be reached or written
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
