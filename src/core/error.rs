//! Error types and handling for the gateway.
//!
//! This module defines the crate-wide error type for everything that can go
//! wrong outside a single request: configuration, schema loading and the
//! transports themselves. Per-request failures never surface here; they are
//! turned into error responses by the dispatcher.

use thiserror::Error;

/// A specialized Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema catalog could not be loaded.
    #[error("Schema error: {0}")]
    Schema(#[from] crate::domains::schemas::SchemaError),

    /// A transport failed to start or stopped unexpectedly.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
