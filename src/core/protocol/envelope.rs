//! Wire envelopes.
//!
//! Requests:
//!
//! ```json
//! {"request_id": "42", "tool_name": "mcp.invoke_tool",
//!  "parameters": {"tool_name": "mt5.get_symbol_tick", "parameters": {"symbol": "EURUSD"}}}
//! ```
//!
//! Responses carry the request id and exactly one of `result` or `error`:
//!
//! ```json
//! {"request_id": "42", "result": {"bid": 1.1, "ask": 1.1002}}
//! {"request_id": "42", "error": {"message": "Tool 'mt5.x' not found.", "code": "not_found"}}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::error;

use super::error::{DispatchError, ErrorCode};

/// Request id used when a request carries none (or cannot be read).
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

/// Meta-operation returning every loaded schema.
pub const LIST_TOOLS: &str = "mcp.list_tools";

/// Meta-operation invoking a tool.
pub const INVOKE_TOOL: &str = "mcp.invoke_tool";

/// The meta-operations a request can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTools,
    InvokeTool,
}

impl Operation {
    /// Resolve an outer `tool_name`.
    pub fn parse(tool_name: &str) -> Result<Self, DispatchError> {
        match tool_name {
            LIST_TOOLS => Ok(Self::ListTools),
            INVOKE_TOOL => Ok(Self::InvokeTool),
            other => Err(DispatchError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// Outer request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Client correlation id. Anything other than a string reads as absent.
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_id: Option<String>,

    /// Meta-operation name (`mcp.list_tools` or `mcp.invoke_tool`).
    pub tool_name: String,

    /// Operation payload; its shape depends on `tool_name`.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub parameters: Value,
}

impl RequestEnvelope {
    /// Build a list-tools request.
    pub fn list_tools(request_id: Option<String>) -> Self {
        Self {
            request_id,
            tool_name: LIST_TOOLS.to_string(),
            parameters: Value::Null,
        }
    }

    /// Build an invoke request for a fully-qualified tool name.
    pub fn invoke(request_id: Option<String>, tool: impl Into<String>, arguments: Value) -> Self {
        Self {
            request_id,
            tool_name: INVOKE_TOOL.to_string(),
            parameters: serde_json::json!({
                "tool_name": tool.into(),
                "parameters": arguments,
            }),
        }
    }

    /// Read an envelope out of a decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self, DispatchError> {
        if !value.is_object() {
            return Err(DispatchError::invalid_request("request must be a JSON object"));
        }
        Self::deserialize(value).map_err(|e| DispatchError::invalid_request(e.to_string()))
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(Some(id)),
        _ => Ok(None),
    }
}

/// Payload of an invoke request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeCall {
    /// Fully-qualified target tool, e.g. `mt5.get_symbol_tick`.
    pub tool_name: String,

    /// Arguments for the tool's handler.
    pub parameters: Value,
}

impl InvokeCall {
    /// Read the invoke payload from an envelope's `parameters`.
    pub fn from_parameters(parameters: &Value) -> Result<Self, DispatchError> {
        if !parameters.is_object() {
            return Err(DispatchError::invalid_request(
                "invoke parameters must be an object with 'tool_name' and 'parameters'",
            ));
        }
        Self::deserialize(parameters).map_err(|e| DispatchError::invalid_request(e.to_string()))
    }
}

/// Best-effort request id of a decoded request.
///
/// Never fails: anything other than a string `request_id` yields
/// [`UNKNOWN_REQUEST_ID`].
pub fn extract_request_id(value: &Value) -> String {
    value
        .get("request_id")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_REQUEST_ID)
        .to_string()
}

/// Error payload of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: ErrorCode,
}

/// Either a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Result(Value),
    Error(ErrorBody),
}

/// Outer response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub request_id: String,

    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ResponseEnvelope {
    /// Create a success response.
    pub fn success(request_id: impl Into<String>, result: Value) -> Self {
        Self {
            request_id: request_id.into(),
            outcome: Outcome::Result(result),
        }
    }

    /// Create an error response from a dispatch failure.
    pub fn failure(request_id: impl Into<String>, error: &DispatchError) -> Self {
        Self {
            request_id: request_id.into(),
            outcome: Outcome::Error(ErrorBody {
                message: error.to_string(),
                code: error.code(),
            }),
        }
    }

    /// The result, if this is a success response.
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    /// The error, if this is an error response.
    pub fn error(&self) -> Option<&ErrorBody> {
        match &self.outcome {
            Outcome::Result(_) => None,
            Outcome::Error(body) => Some(body),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    /// Encode as a single line of JSON (no trailing newline).
    pub fn encode(&self) -> String {
        match serde_json::to_string(self) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to encode response {}: {}", self.request_id, e);
                format!(
                    r#"{{"request_id":{},"error":{{"message":"Failed to encode response.","code":"internal_error"}}}}"#,
                    Value::String(self.request_id.clone())
                )
            }
        }
    }
}
