//! Core error types for cartomancy-core.
//!
//! This module defines the error hierarchy using thiserror. Persistence
//! failures are split into read and write flavours because callers recover
//! from them differently: a bad read is treated as "no record", a bad write
//! is logged and the in-memory result still stands.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cartomancy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Caller supplied an argument outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Key-value store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The directory holding the database could not be created
    #[error("Data directory {path} unavailable: {source}")]
    DataDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend could not produce a value for the key
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// A value was read but does not match the expected record schema
    #[error("Corrupt value under '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// The value could not be durably committed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Schema migration failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,
}

impl StoreError {
    /// True for the failures that mean "the stored record cannot be used".
    pub fn is_read_failure(&self) -> bool {
        matches!(self, StoreError::ReadFailed { .. } | StoreError::Corrupt { .. })
    }

    pub(crate) fn corrupt(key: &str, message: impl ToString) -> Self {
        StoreError::Corrupt {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key is not part of the configuration schema
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Requested more distinct items than the population holds
    #[error("Cannot draw {count} distinct items from a population of {len}")]
    CountExceedsPopulation { count: usize, len: usize },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Lookup by id found nothing
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: String, id: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                StoreError::Locked
            }
            _ => StoreError::ReadFailed {
                key: String::new(),
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_failures_are_classified() {
        assert!(StoreError::corrupt("k", "bad json").is_read_failure());
        assert!(StoreError::ReadFailed {
            key: "k".into(),
            message: "io".into()
        }
        .is_read_failure());
        assert!(!StoreError::WriteFailed {
            key: "k".into(),
            message: "disk full".into()
        }
        .is_read_failure());
    }

    #[test]
    fn validation_error_converts_to_invalid_argument() {
        let err: CoreError = ValidationError::CountExceedsPopulation { count: 4, len: 3 }.into();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "Invalid argument: Cannot draw 4 distinct items from a population of 3"
        );
    }
}
