//! TCP transport implementation.
//!
//! Each accepted connection carries exactly one request: the handler reads
//! once (up to the configured buffer size), dispatches, writes the response
//! and closes. Connections are served by independent tasks that share only
//! the read-only gateway state, so a slow tool blocks its own client and
//! nobody else.

use std::future::Future;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{TcpConfig, TransportError, TransportResult};
use crate::core::GatewayServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport until Ctrl-C.
    pub async fn run(self, server: GatewayServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (one JSON request per connection)", addr);

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        Self::serve(listener, server, self.config.read_buffer_size, shutdown).await
    }

    /// Accept connections on `listener` until `shutdown` resolves.
    ///
    /// On shutdown the listener stops accepting. Connections still waiting
    /// for their request are closed without a reply; connections whose
    /// request was already read are allowed to finish.
    pub async fn serve<F>(
        listener: TcpListener,
        server: GatewayServer,
        read_buffer_size: usize,
        shutdown: F,
    ) -> TransportResult<()>
    where
        F: Future<Output = ()>,
    {
        let mut connections = JoinSet::new();
        let (stop_reading, reading_stopped) = watch::channel(false);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = joined {
                        warn!("Connection task failed: {}", e);
                    }
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        info!("Accepted connection from {}", peer_addr);

                        // Set TCP_NODELAY to disable Nagle's algorithm
                        if let Err(e) = stream.set_nodelay(true) {
                            warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                        }

                        let server = server.clone();
                        let stopped = reading_stopped.clone();
                        connections.spawn(async move {
                            Self::handle_connection(
                                server,
                                stream,
                                peer_addr,
                                read_buffer_size,
                                stopped,
                            )
                            .await;
                        });
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        // Small delay to avoid spinning on persistent errors
                        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                    }
                },
            }
        }

        let _ = stop_reading.send(true);
        if !connections.is_empty() {
            info!("Waiting for {} open connections", connections.len());
        }
        while let Some(joined) = connections.join_next().await {
            if let Err(e) = joined {
                warn!("Connection task failed: {}", e);
            }
        }

        info!("TCP transport finished");
        Ok(())
    }

    /// Handle a single TCP connection: one read, one response, close.
    ///
    /// The read is abandoned once `stopped` flips, so an idle client cannot
    /// hold up shutdown.
    async fn handle_connection(
        server: GatewayServer,
        mut stream: TcpStream,
        peer_addr: SocketAddr,
        read_buffer_size: usize,
        mut stopped: watch::Receiver<bool>,
    ) {
        let mut buf = vec![0u8; read_buffer_size];

        let read = tokio::select! {
            read = stream.read(&mut buf) => read,
            _ = stopped.changed() => {
                debug!("Shutting down, dropping idle client {}", peer_addr);
                return;
            }
        };

        let n = match read {
            Ok(0) => {
                debug!("Client {} sent nothing, closing", peer_addr);
                return;
            }
            Ok(n) => n,
            Err(e) => {
                warn!("Failed to read from {}: {}", peer_addr, e);
                return;
            }
        };

        let response = server.handle_raw(&buf[..n]).await;

        if let Err(e) = stream.write_all(response.encode().as_bytes()).await {
            warn!("Failed to write response to {}: {}", peer_addr, e);
            return;
        }

        if let Err(e) = stream.shutdown().await {
            debug!("Failed to shut down connection to {}: {}", peer_addr, e);
        }

        debug!("Client {} served", peer_addr);
    }
}
