//! Symbol tick tool definition.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{decode_params, error_value, record_value};
use crate::domains::tools::terminal::TradingTerminal;

/// Parameters for the symbol tick tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolTickParams {
    /// Symbol to query, e.g. `EURUSD`.
    pub symbol: String,
}

/// Symbol tick tool - latest bid/ask/last for a symbol.
pub struct SymbolTickTool;

impl SymbolTickTool {
    pub const NAME: &'static str = "get_symbol_tick";

    #[instrument(skip_all, fields(symbol = %params.symbol))]
    pub fn execute(params: &SymbolTickParams, terminal: &dyn TradingTerminal) -> Value {
        info!("Symbol tick tool called for {}", params.symbol);

        match terminal.symbol_tick(&params.symbol) {
            Ok(record) => record_value(record),
            Err(e) => error_value(e),
        }
    }

    pub fn handler(arguments: Value, terminal: &dyn TradingTerminal) -> Result<Value, ToolError> {
        let params: SymbolTickParams = decode_params(arguments)?;
        Ok(Self::execute(&params, terminal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::terminal::TerminalError;
    use crate::domains::tools::testing::StubTerminal;
    use serde_json::json;

    #[test]
    fn test_returns_tick() {
        let terminal = StubTerminal::new();
        let result = SymbolTickTool::handler(json!({ "symbol": "EURUSD" }), &terminal).unwrap();
        assert_eq!(result, json!({ "bid": 1.1, "ask": 1.1002 }));
    }

    #[test]
    fn test_unknown_symbol_is_null() {
        let terminal = StubTerminal {
            tick: None,
            ..StubTerminal::new()
        };
        let result = SymbolTickTool::handler(json!({ "symbol": "NOPE" }), &terminal).unwrap();
        assert_eq!(result, Value::Null);
    }

    #[test]
    fn test_terminal_failure_is_error_value() {
        let terminal = StubTerminal::failing(TerminalError::request("symbol not selected"));
        let result = SymbolTickTool::handler(json!({ "symbol": "EURUSD" }), &terminal).unwrap();
        assert_eq!(
            result,
            json!({ "error": true, "message": "symbol not selected" })
        );
    }

    #[test]
    fn test_missing_symbol_is_invalid_arguments() {
        let terminal = StubTerminal::new();
        let result = SymbolTickTool::handler(json!({}), &terminal);
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert_eq!(terminal.calls(), 0);
    }
}
