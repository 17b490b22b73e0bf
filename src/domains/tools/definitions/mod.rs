//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod account;
pub mod common;
pub mod market;

pub use account::{AccountInfoParams, AccountInfoTool};
pub use market::{
    HistoricalDataParams, HistoricalDataTool, IndicatorValueParams, IndicatorValueTool,
    SymbolTickParams, SymbolTickTool,
};
