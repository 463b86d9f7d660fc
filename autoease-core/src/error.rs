//! Error types for the autoease core library.

use thiserror::Error;

/// Top-level error type for all autoease operations.
#[derive(Error, Debug)]
pub enum EaseError {
    /// A resolved configuration failed numeric validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The raw configuration document is not valid JSON.
    #[error("Malformed configuration document: {0}")]
    Parse(String),

    /// Generic I/O error while loading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, EaseError>;
