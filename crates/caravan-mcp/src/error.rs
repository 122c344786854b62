//! Error types for the caravan MCP server.

use thiserror::Error;

/// Errors that can occur in the caravan MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the caravan engine.
    #[error("Engine error: {0}")]
    Engine(#[from] caravan::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MCP protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// Result type for caravan MCP operations.
pub type Result<T> = std::result::Result<T, Error>;
