//! Market data tools.
//!
//! Tick, historical bar and indicator queries against the trading terminal.

pub mod history;
pub mod indicator;
pub mod tick;

pub use history::{HistoricalDataParams, HistoricalDataTool};
pub use indicator::{IndicatorValueParams, IndicatorValueTool};
pub use tick::{SymbolTickParams, SymbolTickTool};
