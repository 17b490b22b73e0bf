//! Tool handlers module.
//!
//! The set of handlers is closed: every invocable tool is one variant of
//! [`ToolHandler`], and dispatch is a plain `match` onto the tool's
//! definition in `definitions/`.

use serde_json::Value;

use super::ToolError;
use super::definitions::{AccountInfoTool, HistoricalDataTool, IndicatorValueTool, SymbolTickTool};
use super::terminal::TradingTerminal;

/// A callable tool, identified by its short (un-namespaced) name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolHandler {
    AccountInfo,
    SymbolTick,
    HistoricalData,
    IndicatorValue,
}

impl ToolHandler {
    /// Every handler, in registration order.
    pub const ALL: [ToolHandler; 4] = [
        ToolHandler::AccountInfo,
        ToolHandler::SymbolTick,
        ToolHandler::HistoricalData,
        ToolHandler::IndicatorValue,
    ];

    /// Short tool name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AccountInfo => AccountInfoTool::NAME,
            Self::SymbolTick => SymbolTickTool::NAME,
            Self::HistoricalData => HistoricalDataTool::NAME,
            Self::IndicatorValue => IndicatorValueTool::NAME,
        }
    }

    /// Run the handler with already-validated arguments.
    pub fn call(
        &self,
        arguments: Value,
        terminal: &dyn TradingTerminal,
    ) -> Result<Value, ToolError> {
        match self {
            Self::AccountInfo => AccountInfoTool::handler(arguments, terminal),
            Self::SymbolTick => SymbolTickTool::handler(arguments, terminal),
            Self::HistoricalData => HistoricalDataTool::handler(arguments, terminal),
            Self::IndicatorValue => IndicatorValueTool::handler(arguments, terminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::StubTerminal;
    use serde_json::json;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ToolHandler::ALL.iter().map(ToolHandler::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ToolHandler::ALL.len());
    }

    #[test]
    fn test_call_routes_to_definition() {
        let terminal = StubTerminal::new();
        let result = ToolHandler::SymbolTick
            .call(json!({ "symbol": "EURUSD" }), &terminal)
            .unwrap();
        assert_eq!(result["bid"], json!(1.1));
    }
}
