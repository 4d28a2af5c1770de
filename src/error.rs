//! Error types for dynip.

use thiserror::Error;

/// Result type alias for dynip.
pub type Result<T> = std::result::Result<T, DynipError>;

/// dynip error types.
#[derive(Error, Debug)]
pub enum DynipError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// Public IP resolution failed on every endpoint.
    #[error("{0}")]
    Resolution(String),

    /// The dynamic DNS endpoint answered with a non-success status.
    #[error("Update failed with HTTP {status}: {body}")]
    Update { status: u16, body: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for DynipError {
    fn from(e: reqwest::Error) -> Self {
        DynipError::Network(e.to_string())
    }
}

impl From<toml::de::Error> for DynipError {
    fn from(e: toml::de::Error) -> Self {
        DynipError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for DynipError {
    fn from(e: serde_json::Error) -> Self {
        DynipError::Serialization(e.to_string())
    }
}
