//! MT5 Gateway Library
//!
//! This crate provides a request gateway in front of a MetaTrader 5 trading
//! terminal. Clients send JSON requests naming an operation; the gateway
//! validates tool parameters against declared JSON Schemas, dispatches to a
//! registered tool and answers with a JSON envelope carrying either a result
//! or an error.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the request protocol
//!   (envelopes and dispatcher), the shared server handle and the transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **schemas**: The schema catalog and parameter validation
//!   - **tools**: The MT5 tools and the terminal boundary they call
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mt5_gateway::core::{Config, GatewayServer, TransportService};
//! use mt5_gateway::domains::schemas::SchemaCatalog;
//! use mt5_gateway::domains::tools::{DisconnectedTerminal, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let catalog = SchemaCatalog::load(&config.schemas.path)?;
//!     let registry = ToolRegistry::new(Arc::new(DisconnectedTerminal));
//!     let server = GatewayServer::new(config.clone(), catalog, registry);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, GatewayServer, Result};
