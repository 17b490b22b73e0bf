//! MT5 Gateway Entry Point
//!
//! Loads configuration, initializes logging, loads the schema catalog and
//! starts the gateway with the configured transport.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use mt5_gateway::core::config::LoggingConfig;
use mt5_gateway::core::{Config, GatewayServer, TransportService};
use mt5_gateway::domains::schemas::SchemaCatalog;
use mt5_gateway::domains::tools::{DisconnectedTerminal, ToolRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Invalid configuration")?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // A missing or malformed schema source is fatal
    let catalog = SchemaCatalog::load(&config.schemas.path).with_context(|| {
        format!(
            "Failed to load tool schemas from {}",
            config.schemas.path.display()
        )
    })?;

    let registry = ToolRegistry::new(Arc::new(DisconnectedTerminal));
    info!("Registered tools: {}", registry.tool_names().join(", "));

    let server = GatewayServer::new(config.clone(), catalog, registry);

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never mix with responses on stdout.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
