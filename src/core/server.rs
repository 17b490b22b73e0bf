//! Gateway server.
//!
//! This module contains the shared handle every transport drives. It owns
//! the dispatcher (and through it the schema catalog and tool registry) and
//! adds the two things transports need on top of it: decoding raw bytes,
//! and running the blocking dispatcher off the async reactor.
//!
//! Cloning a [`GatewayServer`] is cheap; all clones share the same
//! read-only state.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use super::config::Config;
use super::protocol::{
    DispatchError, Dispatcher, ResponseEnvelope, UNKNOWN_REQUEST_ID, extract_request_id,
};
use crate::domains::schemas::SchemaCatalog;
use crate::domains::tools::ToolRegistry;

/// The gateway handle shared by all transports.
#[derive(Clone)]
pub struct GatewayServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Request dispatcher over the read-only catalogs.
    dispatcher: Arc<Dispatcher>,
}

impl GatewayServer {
    /// Create a new server from a loaded catalog and a tool registry.
    pub fn new(config: Config, catalog: SchemaCatalog, registry: ToolRegistry) -> Self {
        registry.warn_missing_schemas(&catalog);

        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(Dispatcher::new(catalog, registry)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the dispatcher.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Decode one raw request and handle it.
    ///
    /// Input that is not valid UTF-8 JSON yields a `decode_error` response
    /// with the unknown request id.
    pub async fn handle_raw(&self, raw: &[u8]) -> ResponseEnvelope {
        match serde_json::from_slice::<Value>(raw) {
            Ok(request) => {
                debug!("Received request: {}", request);
                self.handle_request(request).await
            }
            Err(e) => {
                error!("Failed to decode request: {}", e);
                ResponseEnvelope::failure(UNKNOWN_REQUEST_ID, &DispatchError::Decode(e.to_string()))
            }
        }
    }

    /// Handle one decoded request on the blocking pool.
    pub async fn handle_request(&self, request: Value) -> ResponseEnvelope {
        let dispatcher = self.dispatcher.clone();
        let request_id = extract_request_id(&request);

        let response = tokio::task::spawn_blocking(move || dispatcher.handle(&request)).await;

        match response {
            Ok(response) => {
                debug!("Sent response: {}", response.encode());
                response
            }
            Err(e) => {
                warn!("Dispatch task for request {} failed: {}", request_id, e);
                ResponseEnvelope::failure(
                    request_id,
                    &DispatchError::internal(format!("dispatch task failed: {}", e)),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::ErrorCode;
    use crate::domains::tools::testing::StubTerminal;
    use serde_json::json;

    fn test_server() -> GatewayServer {
        let catalog = SchemaCatalog::from_definitions(vec![json!({
            "name": "mt5.get_symbol_tick",
            "parameters": {
                "type": "object",
                "properties": { "symbol": { "type": "string" } },
                "required": ["symbol"]
            }
        })])
        .unwrap();
        let registry = ToolRegistry::new(Arc::new(StubTerminal::new()));
        GatewayServer::new(Config::default(), catalog, registry)
    }

    #[tokio::test]
    async fn test_handle_raw_invoke() {
        let server = test_server();
        let raw = br#"{"tool_name":"mcp.invoke_tool","parameters":{"tool_name":"mt5.get_symbol_tick","parameters":{"symbol":"EURUSD"}}}"#;
        let response = server.handle_raw(raw).await;
        assert_eq!(
            response,
            ResponseEnvelope::success("unknown", json!({ "bid": 1.1, "ask": 1.1002 }))
        );
    }

    #[tokio::test]
    async fn test_handle_raw_malformed_json() {
        let server = test_server();
        let response = server.handle_raw(b"{\"tool_name\": ").await;
        assert_eq!(response.request_id, UNKNOWN_REQUEST_ID);
        let error = response.error().unwrap();
        assert_eq!(error.code, ErrorCode::DecodeError);
        assert!(error.message.starts_with("Invalid JSON format"));
    }

    #[tokio::test]
    async fn test_handle_raw_invalid_utf8() {
        let server = test_server();
        let response = server.handle_raw(&[0xff, 0xfe, b'{']).await;
        assert_eq!(response.error().unwrap().code, ErrorCode::DecodeError);
    }

    #[tokio::test]
    async fn test_clones_share_dispatcher() {
        let server = test_server();
        let clone = server.clone();
        assert!(Arc::ptr_eq(server.dispatcher(), clone.dispatcher()));
        assert_eq!(clone.name(), "mt5-gateway");
    }
}
