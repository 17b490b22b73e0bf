//! Tools domain module.
//!
//! This module handles all tool-related functionality for the gateway.
//! Tools are blocking operations against a trading terminal, invoked by
//! clients through the dispatcher after their parameters pass validation.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The closed set of callable handlers
//! - `registry.rs` - Short-name registry and namespace handling
//! - `terminal.rs` - The trading terminal boundary
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()` and `handler()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a variant to `ToolHandler` in `handlers.rs`
//! 4. Declare its schema (`mt5.<name>`) in the schema source

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ToolError;
pub use handlers::ToolHandler;
pub use registry::{TOOL_NAMESPACE, ToolRegistry, qualified_name, short_name};
pub use terminal::{DisconnectedTerminal, TradingTerminal};
