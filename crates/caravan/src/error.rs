//! Error types for caravan operations.

use std::io;
use thiserror::Error;

/// The error type for caravan operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool input did not have the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for caravan operations.
pub type Result<T> = std::result::Result<T, Error>;
