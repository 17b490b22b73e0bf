//! Transport service - orchestrates different transport types.
//!
//! This service provides a unified interface for starting the gateway
//! with the configured transport.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::GatewayServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

/// Transport service - manages the transport layer for the gateway.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Log information about the configured transport.
    pub fn log_info(&self, server: &GatewayServer) {
        info!(
            "Starting {} on transport: {}",
            server.name(),
            self.config.description()
        );
    }

    /// Start the transport with the given server.
    ///
    /// STDIO returns at end of input; TCP returns on Ctrl-C.
    pub async fn run(self, server: GatewayServer) -> TransportResult<()> {
        self.log_info(&server);

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
        }
    }
}
