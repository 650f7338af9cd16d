//! API server — HTTP listener, routing, and middleware assembly.

use crate::rest::{self, AppState};
use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use outreach_core::config::AppConfig;
use outreach_smartlead::SmartleadClient;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server fronting the campaign orchestration.
pub struct ApiServer {
    config: AppConfig,
    client: Arc<SmartleadClient>,
}

impl ApiServer {
    pub fn new(config: AppConfig, client: Arc<SmartleadClient>) -> Self {
        Self { config, client }
    }

    /// Build the application router with all middleware attached.
    pub fn router(&self) -> anyhow::Result<Router> {
        let state = AppState {
            client: self.client.clone(),
            start_time: Instant::now(),
        };

        let cors = cors_layer(&self.config.cors.allowed_origin)?;

        Ok(Router::new()
            // Campaign orchestration
            .route("/api/create-campaign", post(rest::create_campaign))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state))
    }

    /// Start the HTTP server. Blocks until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router()?;

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

/// Cross-origin policy for the configured frontend origin: credentialed
/// requests, the standard method set, Content-Type and Authorization
/// headers. Preflight is answered for every route since the layer wraps
/// the whole router.
fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin: {allowed_origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}
