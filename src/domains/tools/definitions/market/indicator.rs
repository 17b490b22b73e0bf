//! Indicator value tool definition.
//!
//! Reads the latest value of a terminal-computed indicator (SMA or RSI on
//! close prices). Any indicator the terminal cannot produce reports a `null`
//! value rather than an error.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{decode_params, error_value};
use crate::domains::tools::terminal::{Indicator, Timeframe, TradingTerminal};

/// Parameters for the indicator value tool.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorValueParams {
    pub symbol: String,

    /// Timeframe constant name, e.g. `TIMEFRAME_M15`.
    pub timeframe: String,

    /// Indicator name: `SMA` or `RSI`.
    pub indicator: String,

    /// Averaging period in bars.
    pub period: u32,
}

/// Indicator value tool.
pub struct IndicatorValueTool;

impl IndicatorValueTool {
    pub const NAME: &'static str = "get_indicator_value";

    #[instrument(skip_all, fields(symbol = %params.symbol, indicator = %params.indicator))]
    pub fn execute(params: &IndicatorValueParams, terminal: &dyn TradingTerminal) -> Value {
        info!(
            "Indicator tool called: {}({}) on {} {}",
            params.indicator, params.period, params.symbol, params.timeframe
        );

        if let Err(e) = terminal.ensure_initialized() {
            return error_value(e);
        }

        let timeframe: Timeframe = match params.timeframe.parse() {
            Ok(tf) => tf,
            Err(e) => return error_value(e),
        };

        let Some(indicator) = Indicator::parse(&params.indicator) else {
            debug!("Unsupported indicator {}", params.indicator);
            return json!({ "value": Value::Null });
        };

        match terminal.indicator(&params.symbol, timeframe, indicator, params.period) {
            Ok(Some(value)) if value.is_finite() => json!({ "value": value }),
            Ok(_) => json!({ "value": Value::Null }),
            Err(e) => error_value(e),
        }
    }

    pub fn handler(arguments: Value, terminal: &dyn TradingTerminal) -> Result<Value, ToolError> {
        let params: IndicatorValueParams = decode_params(arguments)?;
        Ok(Self::execute(&params, terminal))
    }
}
