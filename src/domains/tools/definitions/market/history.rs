//! Historical data tool definition.
//!
//! Fetches the most recent OHLC bars for a symbol and timeframe.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{decode_params, error_value};
use crate::domains::tools::terminal::{Timeframe, TradingTerminal};

/// Parameters for the historical data tool.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalDataParams {
    /// Symbol to query.
    pub symbol: String,

    /// Timeframe constant name, e.g. `TIMEFRAME_H1`.
    pub timeframe: String,

    /// Number of bars, counted back from the current one.
    pub count: u32,
}

/// Historical data tool.
pub struct HistoricalDataTool;

impl HistoricalDataTool {
    pub const NAME: &'static str = "get_historical_data";

    #[instrument(skip_all, fields(symbol = %params.symbol, timeframe = %params.timeframe))]
    pub fn execute(
        params: &HistoricalDataParams,
        terminal: &dyn TradingTerminal,
    ) -> Result<Value, ToolError> {
        info!(
            "Historical data tool called: {} bars of {} {}",
            params.count, params.symbol, params.timeframe
        );

        if let Err(e) = terminal.ensure_initialized() {
            return Ok(error_value(e));
        }

        let timeframe: Timeframe = match params.timeframe.parse() {
            Ok(tf) => tf,
            Err(e) => return Ok(error_value(e)),
        };

        let rates = match terminal.rates(&params.symbol, timeframe, params.count) {
            Ok(rates) => rates.unwrap_or_default(),
            Err(e) => return Ok(error_value(e)),
        };

        info!("Fetched {} bars", rates.len());

        let data = serde_json::to_value(&rates)
            .map_err(|e| ToolError::execution_failed(format!("Failed to encode bars: {}", e)))?;
        Ok(json!({ "data": data }))
    }

    pub fn handler(arguments: Value, terminal: &dyn TradingTerminal) -> Result<Value, ToolError> {
        let params: HistoricalDataParams = decode_params(arguments)?;
        Self::execute(&params, terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::terminal::TerminalError;
    use crate::domains::tools::testing::StubTerminal;

    fn args(timeframe: &str, count: u32) -> Value {
        json!({ "symbol": "EURUSD", "timeframe": timeframe, "count": count })
    }

    #[test]
    fn test_returns_bars() {
        let terminal = StubTerminal::new();
        let result = HistoricalDataTool::handler(args("TIMEFRAME_H1", 2), &terminal).unwrap();
        let data = result["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(
            data[0],
            json!({ "time": 1_700_000_000, "open": 1.1, "high": 1.2, "low": 1.0, "close": 1.15 })
        );
    }

    #[test]
    fn test_no_rates_is_empty_data() {
        let terminal = StubTerminal {
            rates: None,
            ..StubTerminal::new()
        };
        let result = HistoricalDataTool::handler(args("TIMEFRAME_D1", 5), &terminal).unwrap();
        assert_eq!(result, json!({ "data": [] }));
    }

    #[test]
    fn test_unknown_timeframe_is_error_value() {
        let terminal = StubTerminal::new();
        let result = HistoricalDataTool::handler(args("TIMEFRAME_X9", 5), &terminal).unwrap();
        assert_eq!(result["error"], json!(true));
        assert_eq!(terminal.calls(), 0);
    }

    #[test]
    fn test_terminal_failure_is_error_value() {
        let terminal = StubTerminal::failing(TerminalError::NotInitialized);
        let result = HistoricalDataTool::handler(args("TIMEFRAME_H1", 5), &terminal).unwrap();
        assert_eq!(result["error"], json!(true));
    }

    #[test]
    fn test_uninitialized_terminal_reported_before_timeframe() {
        let terminal = StubTerminal::failing(TerminalError::NotInitialized);
        let result = HistoricalDataTool::handler(args("TIMEFRAME_X9", 5), &terminal).unwrap();
        assert_eq!(
            result["message"],
            json!("MT5 initialization failed. Is the terminal running and logged in?")
        );
        assert_eq!(terminal.calls(), 0);
    }

    #[test]
    fn test_negative_count_is_invalid_arguments() {
        let terminal = StubTerminal::new();
        let result = HistoricalDataTool::handler(
            json!({ "symbol": "EURUSD", "timeframe": "TIMEFRAME_H1", "count": -1 }),
            &terminal,
        );
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
