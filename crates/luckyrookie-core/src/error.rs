//! Core error types for luckyrookie-core.
//!
//! Errors fall into three families: validation (bad user input, blocks the
//! dependent computation), storage (best-effort, callers usually degrade to
//! "no data"), and remote (surfaced to the user as a message naming the
//! service). Nothing here is fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for luckyrookie-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote API errors
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// Stored value could not be decoded
    #[error("Corrupt value under '{key}': {message}")]
    Corrupt { key: String, message: String },
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Missing credential for a remote service
    #[error("No credential '{key}' configured for {service}")]
    MissingCredential { service: String, key: String },

    /// Keyring access failed
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date not in `YYYY-MM-DD` shape or not a real calendar date
    #[error("Birth date format must be YYYY-MM-DD (e.g., 2002-12-07), got '{0}'")]
    InvalidDate(String),

    /// Breathing pattern with every phase at zero seconds
    #[error("Breathing pattern '{0}' has no phase with a non-zero duration")]
    EmptyPattern(String),

    /// Unknown breathing pattern key
    #[error("Unknown breathing pattern: {0}")]
    UnknownPattern(String),

    /// Operation not allowed in the current engine state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Remote API errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport failure (DNS, TLS, connection, body decode)
    #[error("{service} request failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Configured base URL does not form a valid endpoint
    #[error("{service} endpoint '{url}' is not a valid URL: {source}")]
    InvalidUrl {
        service: &'static str,
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Response was well-formed but carried nothing usable
    #[error("{service} returned no usable data: {message}")]
    Empty {
        service: &'static str,
        message: String,
    },
}

impl RemoteError {
    pub(crate) fn request(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| RemoteError::Request { service, source }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<keyring::Error> for ConfigError {
    fn from(err: keyring::Error) -> Self {
        ConfigError::Keyring(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
