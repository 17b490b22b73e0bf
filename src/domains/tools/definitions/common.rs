//! Common utilities shared across tool definitions.
//!
//! This module provides parameter decoding and the handler-local result
//! conventions every tool follows.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use crate::domains::tools::ToolError;
use crate::domains::tools::terminal::Record;

/// Decode validated arguments into a tool's typed parameter struct.
///
/// Arguments have already passed the tool's schema, so a failure here means
/// the schema is looser than the handler.
pub fn decode_params<P: DeserializeOwned>(arguments: Value) -> Result<P, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Build the handler-local error value: `{"error": true, "message": ...}`.
///
/// This is a successful result from the gateway's point of view; clients
/// recognise it by the `error` flag.
pub fn error_value(message: impl std::fmt::Display) -> Value {
    let message = message.to_string();
    warn!("{}", message);
    json!({ "error": true, "message": message })
}

/// Turn an optional terminal record into a result value (`null` if absent).
pub fn record_value(record: Option<Record>) -> Value {
    record.map(Value::Object).unwrap_or(Value::Null)
}
