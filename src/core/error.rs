//! Custom error types for Tinker
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Tinker operations
#[derive(Error, Debug)]
pub enum TinkerError {
    /// Anthropic API errors (bad status, malformed response, connectivity)
    #[error("API error: {0}")]
    Api(String),

    /// Tool execution errors
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session log errors
    #[error("Log error: {0}")]
    Log(String),

    /// Required credential missing at startup
    #[error("ANTHROPIC_API_KEY environment variable is required")]
    MissingApiKey,

    /// The tool-use loop hit its safety cap without a final answer
    #[error("Conversation exceeded {0} tool-use rounds without a final answer")]
    RoundLimit(usize),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Tinker operations
pub type Result<T> = std::result::Result<T, TinkerError>;

impl TinkerError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log error
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }
}
