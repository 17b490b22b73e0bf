//! Test doubles for the trading terminal.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::terminal::{Indicator, Rate, Record, TerminalError, Timeframe, TradingTerminal};

/// An in-memory terminal that returns canned data and counts calls.
#[derive(Debug)]
pub struct StubTerminal {
    pub account: Option<Record>,
    pub tick: Option<Record>,
    pub rates: Option<Vec<Rate>>,
    pub indicator_value: Option<f64>,
    pub failure: Option<TerminalError>,
    pub call_count: AtomicUsize,
}

impl StubTerminal {
    /// A terminal with a sample account, a EURUSD tick and two bars.
    pub fn new() -> Self {
        let mut account = Record::new();
        account.insert("login".to_string(), json!(123));
        account.insert("balance".to_string(), json!(1000.0));

        let mut tick = Record::new();
        tick.insert("bid".to_string(), json!(1.1));
        tick.insert("ask".to_string(), json!(1.1002));

        Self {
            account: Some(account),
            tick: Some(tick),
            rates: Some(vec![
                Rate {
                    time: 1_700_000_000,
                    open: 1.1,
                    high: 1.2,
                    low: 1.0,
                    close: 1.15,
                },
                Rate {
                    time: 1_700_003_600,
                    open: 1.15,
                    high: 1.25,
                    low: 1.1,
                    close: 1.2,
                },
            ]),
            indicator_value: Some(1.125),
            failure: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// A terminal whose every call fails with `error`.
    pub fn failing(error: TerminalError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// How many terminal calls were made.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), TerminalError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl TradingTerminal for StubTerminal {
    fn ensure_initialized(&self) -> Result<(), TerminalError> {
        match &self.failure {
            Some(TerminalError::NotInitialized) => Err(TerminalError::NotInitialized),
            _ => Ok(()),
        }
    }

    fn account_info(&self) -> Result<Option<Record>, TerminalError> {
        self.record_call()?;
        Ok(self.account.clone())
    }

    fn symbol_tick(&self, _symbol: &str) -> Result<Option<Record>, TerminalError> {
        self.record_call()?;
        Ok(self.tick.clone())
    }

    fn rates(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        count: u32,
    ) -> Result<Option<Vec<Rate>>, TerminalError> {
        self.record_call()?;
        Ok(self
            .rates
            .as_ref()
            .map(|rates| rates.iter().take(count as usize).copied().collect()))
    }

    fn indicator(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _indicator: Indicator,
        _period: u32,
    ) -> Result<Option<f64>, TerminalError> {
        self.record_call()?;
        Ok(self.indicator_value)
    }
}
