//! Outreach Relay — campaign-creation proxy for the Smartlead API.
//!
//! Main entry point: loads configuration, refuses to start without an
//! upstream API key, and serves the HTTP proxy.

use clap::Parser;
use outreach_api::ApiServer;
use outreach_core::config::AppConfig;
use outreach_smartlead::SmartleadClient;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "outreach-relay")]
#[command(about = "Campaign-creation proxy for the Smartlead API")]
#[command(version)]
struct Cli {
    /// Listen host (overrides config)
    #[arg(long, env = "OUTREACH_RELAY__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "OUTREACH_RELAY__API__PORT")]
    port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "OUTREACH_RELAY__METRICS__PORT")]
    metrics_port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach_relay=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Outreach Relay starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }

    // Fail fast: a proxy without an upstream key cannot serve anything.
    if let Err(e) = config.validate() {
        error!(error = %e, "Refusing to start with invalid configuration");
        return Err(e.into());
    }

    info!(
        host = %config.api.host,
        port = config.api.port,
        upstream = %config.smartlead.base_url,
        "Configuration loaded"
    );

    let client = Arc::new(SmartleadClient::new(&config.smartlead)?);

    let api_server = ApiServer::new(config, client);

    // Start metrics exporter. Best effort: a failure here is logged and
    // never holds up serving.
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Outreach Relay is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
