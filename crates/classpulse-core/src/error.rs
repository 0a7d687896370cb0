//! Core error types for classpulse-core.
//!
//! The remote counter service is the only external collaborator, so the
//! hierarchy is small: remote failures, configuration failures, and a
//! top-level error that everything converts into at the crate boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the remote counter service.
///
/// No retries happen at this layer; every failure propagates to the
/// component that triggered the call.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Network error or non-success HTTP status.
    #[error("remote counter service unavailable: {message}")]
    Unavailable { message: String },

    /// The count field was absent or not a valid integer.
    #[error("malformed counter response: {detail}")]
    MalformedResponse { detail: String },
}

impl RemoteError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, RemoteError::MalformedResponse { .. })
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Unavailable {
            message: err.to_string(),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Core error type for classpulse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Remote counter service errors
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

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

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
