//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The mapping from short tool name to handler
//! - Namespace handling for fully-qualified names (`mt5.<tool>`)
//! - A cross-check against the schema catalog

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::domains::schemas::SchemaCatalog;

use super::ToolError;
use super::handlers::ToolHandler;
use super::terminal::TradingTerminal;

/// Namespace prefix of every fully-qualified tool name.
pub const TOOL_NAMESPACE: &str = "mt5.";

/// Strip the tool namespace from a fully-qualified name.
///
/// Names without the prefix are returned unchanged.
pub fn short_name(qualified: &str) -> &str {
    qualified.strip_prefix(TOOL_NAMESPACE).unwrap_or(qualified)
}

/// Add the tool namespace to a short name.
pub fn qualified_name(short: &str) -> String {
    format!("{}{}", TOOL_NAMESPACE, short)
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// The registry is built once and never changes. It owns the terminal every
/// handler talks to.
pub struct ToolRegistry {
    handlers: HashMap<&'static str, ToolHandler>,
    terminal: Arc<dyn TradingTerminal>,
}

impl ToolRegistry {
    /// Create a registry with every built-in tool.
    pub fn new(terminal: Arc<dyn TradingTerminal>) -> Self {
        Self::with_handlers(terminal, ToolHandler::ALL)
    }

    /// Create a registry with only the given tools.
    pub fn with_handlers(
        terminal: Arc<dyn TradingTerminal>,
        handlers: impl IntoIterator<Item = ToolHandler>,
    ) -> Self {
        let handlers = handlers.into_iter().map(|h| (h.name(), h)).collect();
        Self { handlers, terminal }
    }

    /// Get all short tool names, sorted.
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Find the handler for a short tool name.
    pub fn resolve(&self, short: &str) -> Option<ToolHandler> {
        self.handlers.get(short).copied()
    }

    /// Run a handler against this registry's terminal.
    pub fn call_tool(&self, handler: ToolHandler, arguments: Value) -> Result<Value, ToolError> {
        handler.call(arguments, self.terminal.as_ref())
    }

    /// Fully-qualified names of registered tools that have no schema.
    ///
    /// Such tools exist but every invocation fails with "schema not found".
    pub fn missing_schemas(&self, catalog: &SchemaCatalog) -> Vec<String> {
        self.tool_names()
            .into_iter()
            .map(qualified_name)
            .filter(|name| !catalog.contains(name))
            .collect()
    }

    /// Log a warning for every tool without a schema.
    pub fn warn_missing_schemas(&self, catalog: &SchemaCatalog) {
        for name in self.missing_schemas(catalog) {
            warn!("Tool '{}' is registered but has no schema; calls will fail", name);
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::terminal::DisconnectedTerminal;
    use crate::domains::tools::testing::StubTerminal;
    use serde_json::json;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(StubTerminal::new()))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"get_account_info"));
        assert!(names.contains(&"get_symbol_tick"));
        assert!(names.contains(&"get_historical_data"));
        assert!(names.contains(&"get_indicator_value"));
    }

    #[test]
    fn test_namespace_handling() {
        assert_eq!(short_name("mt5.get_symbol_tick"), "get_symbol_tick");
        assert_eq!(short_name("get_symbol_tick"), "get_symbol_tick");
        assert_eq!(short_name("other.get_symbol_tick"), "other.get_symbol_tick");
        assert_eq!(qualified_name("get_symbol_tick"), "mt5.get_symbol_tick");
    }

    #[test]
    fn test_resolve() {
        let registry = test_registry();
        assert_eq!(registry.resolve("get_symbol_tick"), Some(ToolHandler::SymbolTick));
        assert_eq!(registry.resolve("unknown_tool"), None);
    }

    #[test]
    fn test_registry_call_tool() {
        let registry = test_registry();
        let result = registry
            .call_tool(ToolHandler::AccountInfo, json!({}))
            .unwrap();
        assert_eq!(result["login"], json!(123));
    }

    #[test]
    fn test_disconnected_registry_reports_error_value() {
        let registry = ToolRegistry::new(Arc::new(DisconnectedTerminal));
        let result = registry
            .call_tool(ToolHandler::SymbolTick, json!({ "symbol": "EURUSD" }))
            .unwrap();
        assert_eq!(result["error"], json!(true));
    }

    #[test]
    fn test_missing_schemas() {
        let registry = test_registry();
        let catalog = SchemaCatalog::from_definitions(vec![
            json!({ "name": "mt5.get_account_info", "parameters": {} }),
            json!({ "name": "mt5.get_symbol_tick", "parameters": {} }),
        ])
        .unwrap();
        assert_eq!(
            registry.missing_schemas(&catalog),
            vec![
                "mt5.get_historical_data".to_string(),
                "mt5.get_indicator_value".to_string()
            ]
        );
    }

    #[test]
    fn test_with_handlers_subset() {
        let registry =
            ToolRegistry::with_handlers(Arc::new(StubTerminal::new()), [ToolHandler::SymbolTick]);
        assert_eq!(registry.tool_names(), vec!["get_symbol_tick"]);
    }

    #[test]
    fn test_bundled_schemas_cover_every_tool() {
        let catalog =
            SchemaCatalog::from_json_str(include_str!("../../../schemas.json")).unwrap();
        let registry = test_registry();
        assert!(registry.missing_schemas(&catalog).is_empty());

        let history = catalog.get("mt5.get_historical_data").unwrap();
        let mut params = json!({ "symbol": "EURUSD", "timeframe": "TIMEFRAME_H1", "count": 10 });
        assert!(history.validate(&params).is_ok());
        params["count"] = json!(0);
        assert!(history.validate(&params).is_err());
    }
}
