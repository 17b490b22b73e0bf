//! Configuration management for the gateway.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) over defaults.

use super::error::Result;
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Default location of the schema source.
pub const DEFAULT_SCHEMA_PATH: &str = "schemas.json";

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Schema catalog configuration.
    pub schemas: SchemasConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server, used in logs.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the schema catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Path to the JSON file holding the tool schema definitions.
    pub path: PathBuf,
}

impl Default for SchemasConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SCHEMA_PATH),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mt5-gateway".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            schemas: SchemasConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_SCHEMA_PATH`.
    ///
    /// Fails if the transport settings are invalid.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        if let Ok(path) = std::env::var("MCP_SCHEMA_PATH") {
            config.schemas.path = PathBuf::from(path);
            info!("Schema source set to {:?}", config.schemas.path);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "MCP_SERVER_NAME",
        "MCP_LOG_LEVEL",
        "MCP_LOG_TIMESTAMPS",
        "MCP_SCHEMA_PATH",
        "MCP_TRANSPORT",
        "MCP_TCP_HOST",
        "MCP_TCP_PORT",
        "MCP_TCP_READ_BUFFER",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.schemas.path, PathBuf::from("schemas.json"));
        assert_eq!(config.logging.level, "info");
        assert!(config.transport.is_stdio());
    }

    #[test]
    fn test_schema_path_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_SCHEMA_PATH", "/etc/mt5/schemas.json");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.schemas.path, PathBuf::from("/etc/mt5/schemas.json"));
        assert!(!config.logging.with_timestamps);
        clear_env();
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_transport_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "tcp");
            std::env::set_var("MCP_TCP_PORT", "9090");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.transport.description(), "TCP on 0.0.0.0:9090");
        clear_env();
    }

    #[test]
    fn test_unknown_transport_is_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "carrier-pigeon");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_invalid_port_is_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "tcp");
            std::env::set_var("MCP_TCP_PORT", "not-a-port");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }
}
