//! Per-request error taxonomy.
//!
//! Every failure the dispatcher or a transport can report to a client is a
//! [`DispatchError`]. Each one maps to a stable [`ErrorCode`] that clients
//! branch on; the human-readable message may change, the code may not.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domains::schemas::ValidationFailure;
use crate::domains::tools::ToolError;

/// Stable classification tag carried in every error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The raw input was not valid JSON.
    DecodeError,
    /// The input was JSON but not a well-formed request envelope.
    InvalidRequest,
    /// The outer `tool_name` names no known meta-operation.
    InvalidOperation,
    /// The tool or its schema does not exist.
    NotFound,
    /// Parameters violate the tool's contract.
    ValidationError,
    /// The handler could not complete.
    HandlerError,
    /// Unexpected failure inside the gateway or a handler.
    InternalError,
}

impl ErrorCode {
    /// The wire representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecodeError => "decode_error",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidOperation => "invalid_operation",
            Self::NotFound => "not_found",
            Self::ValidationError => "validation_error",
            Self::HandlerError => "handler_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end a single request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Raw bytes could not be decoded as JSON.
    #[error("Invalid JSON format: {0}")]
    Decode(String),

    /// The envelope is missing required fields or has the wrong shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown meta-operation.
    #[error("Invalid tool_name specified: '{0}'.")]
    UnsupportedOperation(String),

    /// No handler is registered for the tool.
    #[error("Tool '{0}' not found.")]
    ToolNotFound(String),

    /// The tool has a handler but no schema.
    #[error("Schema for tool '{0}' not found.")]
    SchemaNotFound(String),

    /// Parameters failed schema validation.
    #[error("Invalid parameters for tool '{tool}': {source}")]
    Validation {
        tool: String,
        #[source]
        source: ValidationFailure,
    },

    /// The handler failed.
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// The request could not be run to completion by the server.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Create a new "invalid request" error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classification tag for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Decode(_) => ErrorCode::DecodeError,
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::UnsupportedOperation(_) => ErrorCode::InvalidOperation,
            Self::ToolNotFound(_) | Self::SchemaNotFound(_) => ErrorCode::NotFound,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::Tool(ToolError::InvalidArguments(_)) => ErrorCode::ValidationError,
            Self::Tool(ToolError::ExecutionFailed(_)) => ErrorCode::HandlerError,
            Self::Tool(ToolError::Internal(_)) | Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}
