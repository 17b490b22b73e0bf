//! Request Dispatcher.
//!
//! Turns a decoded request into a response. [`Dispatcher::handle`] is total:
//! every input, however malformed, produces a well-formed
//! [`ResponseEnvelope`], and no handler failure (panics included) escapes.
//!
//! Invoke requests go through, in order: namespace stripping, handler
//! lookup, schema lookup, parameter validation and finally the handler. A
//! handler never sees parameters that failed validation.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde_json::Value;
use tracing::{Span, debug, info, instrument, warn};

use super::envelope::{InvokeCall, Operation, RequestEnvelope, ResponseEnvelope, extract_request_id};
use super::error::DispatchError;
use crate::domains::schemas::SchemaCatalog;
use crate::domains::tools::{ToolError, ToolRegistry, short_name};

/// Routes requests to tools.
///
/// Holds the two read-only catalogs; safe to share across threads.
#[derive(Debug)]
pub struct Dispatcher {
    catalog: SchemaCatalog,
    registry: ToolRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over a loaded catalog and a tool registry.
    pub fn new(catalog: SchemaCatalog, registry: ToolRegistry) -> Self {
        Self { catalog, registry }
    }

    /// Every loaded schema definition, in load order.
    pub fn list_tools(&self) -> Value {
        Value::Array(self.catalog.definitions().cloned().collect())
    }

    /// Handle one decoded request.
    #[instrument(skip_all, fields(request_id))]
    pub fn handle(&self, request: &Value) -> ResponseEnvelope {
        let request_id = extract_request_id(request);
        Span::current().record("request_id", request_id.as_str());

        match self.dispatch(request) {
            Ok(result) => {
                debug!("Request {} succeeded", request_id);
                ResponseEnvelope::success(request_id, result)
            }
            Err(e) => {
                warn!(code = %e.code(), "Error handling request {}: {}", request_id, e);
                ResponseEnvelope::failure(request_id, &e)
            }
        }
    }

    fn dispatch(&self, request: &Value) -> Result<Value, DispatchError> {
        let envelope = RequestEnvelope::from_value(request)?;

        match Operation::parse(&envelope.tool_name)? {
            Operation::ListTools => {
                info!("Listing {} tools", self.catalog.len());
                Ok(self.list_tools())
            }
            Operation::InvokeTool => {
                let call = InvokeCall::from_parameters(&envelope.parameters)?;
                self.invoke(call)
            }
        }
    }

    fn invoke(&self, call: InvokeCall) -> Result<Value, DispatchError> {
        let InvokeCall {
            tool_name,
            parameters,
        } = call;

        let handler = self
            .registry
            .resolve(short_name(&tool_name))
            .ok_or_else(|| DispatchError::ToolNotFound(tool_name.clone()))?;

        let schema = self
            .catalog
            .get(&tool_name)
            .ok_or_else(|| DispatchError::SchemaNotFound(tool_name.clone()))?;

        schema
            .validate(&parameters)
            .map_err(|source| DispatchError::Validation {
                tool: tool_name.clone(),
                source,
            })?;

        info!("Invoking tool {}", tool_name);

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.registry.call_tool(handler, parameters)
        }));

        match outcome {
            Ok(result) => Ok(result?),
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(ToolError::internal(format!("tool '{}' panicked: {}", tool_name, reason)).into())
            }
        }
    }
}
