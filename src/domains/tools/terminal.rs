//! Trading terminal boundary.
//!
//! Tools never talk to MetaTrader 5 directly; they go through the
//! [`TradingTerminal`] trait. The binary wires in [`DisconnectedTerminal`]
//! unless a real bridge is supplied by the embedding application, and tests
//! use in-memory doubles.
//!
//! Every call is blocking. The gateway runs handlers on the blocking pool,
//! so an implementation is free to wait on the terminal.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A record returned by the terminal (account info, tick, ...).
pub type Record = Map<String, Value>;

/// Errors surfaced by a terminal implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TerminalError {
    /// The terminal could not be initialised.
    #[error("MT5 initialization failed. Is the terminal running and logged in?")]
    NotInitialized,

    /// The terminal rejected or failed a request.
    #[error("{0}")]
    Request(String),
}

impl TerminalError {
    /// Create a new request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }
}

/// Chart timeframe, named as in the MetaTrader 5 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    M1,
    M2,
    M3,
    M4,
    M5,
    M6,
    M10,
    M12,
    M15,
    M20,
    M30,
    H1,
    H2,
    H3,
    H4,
    H6,
    H8,
    H12,
    D1,
    W1,
    MN1,
}

impl Timeframe {
    const ALL: [(Timeframe, &'static str); 21] = [
        (Timeframe::M1, "TIMEFRAME_M1"),
        (Timeframe::M2, "TIMEFRAME_M2"),
        (Timeframe::M3, "TIMEFRAME_M3"),
        (Timeframe::M4, "TIMEFRAME_M4"),
        (Timeframe::M5, "TIMEFRAME_M5"),
        (Timeframe::M6, "TIMEFRAME_M6"),
        (Timeframe::M10, "TIMEFRAME_M10"),
        (Timeframe::M12, "TIMEFRAME_M12"),
        (Timeframe::M15, "TIMEFRAME_M15"),
        (Timeframe::M20, "TIMEFRAME_M20"),
        (Timeframe::M30, "TIMEFRAME_M30"),
        (Timeframe::H1, "TIMEFRAME_H1"),
        (Timeframe::H2, "TIMEFRAME_H2"),
        (Timeframe::H3, "TIMEFRAME_H3"),
        (Timeframe::H4, "TIMEFRAME_H4"),
        (Timeframe::H6, "TIMEFRAME_H6"),
        (Timeframe::H8, "TIMEFRAME_H8"),
        (Timeframe::H12, "TIMEFRAME_H12"),
        (Timeframe::D1, "TIMEFRAME_D1"),
        (Timeframe::W1, "TIMEFRAME_W1"),
        (Timeframe::MN1, "TIMEFRAME_MN1"),
    ];

    /// The MetaTrader 5 constant name, e.g. `TIMEFRAME_H1`.
    pub fn as_str(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(tf, _)| tf == self)
            .map(|(_, name)| *name)
            .unwrap_or("TIMEFRAME_UNKNOWN")
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a timeframe name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown timeframe '{0}'")]
pub struct UnknownTimeframe(pub String);

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(tf, _)| *tf)
            .ok_or_else(|| UnknownTimeframe(s.to_string()))
    }
}

/// Indicators the terminal can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Simple moving average of close prices.
    Sma,
    /// Relative strength index of close prices.
    Rsi,
}

impl Indicator {
    /// Parse an indicator name (`SMA`, `RSI`). Unsupported names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SMA" => Some(Self::Sma),
            "RSI" => Some(Self::Rsi),
            _ => None,
        }
    }
}

/// One OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    /// Bar open time, seconds since the Unix epoch.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Blocking access to a trading terminal.
pub trait TradingTerminal: Send + Sync {
    /// Make sure the terminal is connected before a tool touches it.
    ///
    /// Tools call this before interpreting their own arguments, so a dead
    /// terminal is reported the same way whatever was asked of it.
    fn ensure_initialized(&self) -> Result<(), TerminalError> {
        Ok(())
    }

    /// Current account information, or `None` if the terminal has none.
    fn account_info(&self) -> Result<Option<Record>, TerminalError>;

    /// Latest tick for `symbol`, or `None` if the symbol is unknown.
    fn symbol_tick(&self, symbol: &str) -> Result<Option<Record>, TerminalError>;

    /// The `count` most recent bars, newest last, or `None` if unavailable.
    fn rates(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: u32,
    ) -> Result<Option<Vec<Rate>>, TerminalError>;

    /// Latest value of an indicator over `period` bars, or `None` if the
    /// terminal could not produce one.
    fn indicator(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        indicator: Indicator,
        period: u32,
    ) -> Result<Option<f64>, TerminalError>;
}

/// A terminal that is never connected.
///
/// Every call fails with [`TerminalError::NotInitialized`], which tools turn
/// into their handler-local error value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisconnectedTerminal;

impl TradingTerminal for DisconnectedTerminal {
    fn ensure_initialized(&self) -> Result<(), TerminalError> {
        Err(TerminalError::NotInitialized)
    }

    fn account_info(&self) -> Result<Option<Record>, TerminalError> {
        Err(TerminalError::NotInitialized)
    }

    fn symbol_tick(&self, _symbol: &str) -> Result<Option<Record>, TerminalError> {
        Err(TerminalError::NotInitialized)
    }

    fn rates(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _count: u32,
    ) -> Result<Option<Vec<Rate>>, TerminalError> {
        Err(TerminalError::NotInitialized)
    }

    fn indicator(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _indicator: Indicator,
        _period: u32,
    ) -> Result<Option<f64>, TerminalError> {
        Err(TerminalError::NotInitialized)
    }
}
