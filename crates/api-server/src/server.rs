//! API server — serves the dashboard page and its report endpoints.

use crate::rest::{self, AppState};
use crate::{page, report_rest, swagger};
use axum::routing::get;
use axum::Router;
use dashboard_core::config::AppConfig;
use dashboard_data::DataContext;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ApiServer {
    config: AppConfig,
    data: Arc<DataContext>,
}

impl ApiServer {
    pub fn new(config: AppConfig, data: Arc<DataContext>) -> Self {
        Self { config, data }
    }

    /// Build the router with all routes and middleware attached.
    pub fn router(&self) -> Router {
        let state = AppState {
            data: self.data.clone(),
            top_campaigns: self.config.dashboard.top_campaigns,
            start_time: Instant::now(),
        };

        Router::new()
            // Dashboard page
            .route("/", get(page::serve_dashboard))
            // Report endpoints
            .route("/v1/bounds", get(report_rest::handle_bounds))
            .route("/v1/overview", get(report_rest::handle_overview))
            .route("/v1/revenue-trend", get(report_rest::handle_revenue_trend))
            .route(
                "/v1/platforms/:platform/summary",
                get(report_rest::handle_platform_summary),
            )
            .route(
                "/v1/platforms/:platform/daily",
                get(report_rest::handle_platform_daily),
            )
            .route(
                "/v1/platforms/:platform/campaigns",
                get(report_rest::handle_platform_campaigns),
            )
            .route("/api-docs/openapi.json", get(swagger::openapi_json))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }

    /// Start the Prometheus exporter on a separate port, if enabled.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        if !self.config.metrics.enabled {
            return Ok(());
        }

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
