//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// One JSON request per line on stdin, one response per line on stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// One JSON request per accepted TCP connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Size of the single read performed per connection, in bytes.
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 8080;

#[cfg(feature = "tcp")]
fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "tcp")]
fn default_read_buffer_size() -> usize {
    4096
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or tcp");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_host(),
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

/// Parse a numeric environment variable, failing on garbage.
#[cfg(feature = "tcp")]
fn env_number<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("{} must be a number, got '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create a TCP transport config.
    #[cfg(feature = "tcp")]
    pub fn tcp(port: u16, host: impl Into<String>) -> Self {
        Self::Tcp(TcpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` selects the transport (`stdio` when unset). An
    /// unknown or disabled transport is a configuration error.
    pub fn from_env() -> Result<Self> {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => {
                let defaults = TcpConfig::default();
                let port = env_number("MCP_TCP_PORT", defaults.port)?;
                let host = std::env::var("MCP_TCP_HOST").unwrap_or(defaults.host);
                let read_buffer_size =
                    env_number("MCP_TCP_READ_BUFFER", defaults.read_buffer_size)?;
                if read_buffer_size == 0 {
                    return Err(Error::config("MCP_TCP_READ_BUFFER must be greater than zero"));
                }
                Ok(Self::Tcp(TcpConfig {
                    port,
                    host,
                    read_buffer_size,
                }))
            }
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            "" => Ok(Self::default()),
            other => Err(Error::config(format!(
                "Unsupported transport '{}' (expected one of: {})",
                other,
                Self::available().join(", ")
            ))),
        }
    }

    /// Names of the transports compiled into this build.
    pub fn available() -> Vec<&'static str> {
        let mut names = Vec::new();
        #[cfg(feature = "stdio")]
        names.push("stdio");
        #[cfg(feature = "tcp")]
        names.push("tcp");
        names
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (line-delimited JSON)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
        }
    }

    /// Check if this transport is the STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}
