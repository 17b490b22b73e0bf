//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while a tool handler runs.
///
/// Failures reported by the trading terminal are not `ToolError`s: handlers
/// fold them into their `{"error": true, "message": ...}` result value.
/// A `ToolError` means the handler itself could not run to completion.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments passed schema validation but do not fit the handler.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// An internal error occurred, such as a panic inside the handler.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
