//! Transport layer for the gateway.
//!
//! This module provides the two transport implementations:
//! - **STDIO**: One JSON request per line on stdin, one response per line on
//!   stdout - feature: `stdio`
//! - **TCP**: One JSON request per accepted connection, answered and closed -
//!   feature: `tcp`
//!
//! Each transport only moves bytes; decoding and dispatch are delegated to
//! the [`GatewayServer`](crate::core::GatewayServer).

mod config;
mod error;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
