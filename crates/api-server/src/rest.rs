//! Shared handler state, error mapping and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dashboard_core::DashboardError;
use dashboard_data::DataContext;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DataContext>,
    pub top_campaigns: usize,
    pub start_time: Instant,
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map a dashboard error to its HTTP status and body. Filter problems are
/// warnings for the user; anything else is an internal failure.
pub fn error_response(err: DashboardError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        DashboardError::InvalidDateParam(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "invalid_date")
        }
        DashboardError::InvalidDateRange { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "invalid_date_range")
        }
        DashboardError::EmptySelection => (StatusCode::UNPROCESSABLE_ENTITY, "empty_selection"),
        DashboardError::UnknownPlatform(_) => (StatusCode::NOT_FOUND, "unknown_platform"),
        DashboardError::NoData => (StatusCode::SERVICE_UNAVAILABLE, "no_data"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    if err.is_user_facing() {
        warn!(error = %err, "Rejected dashboard filter");
    } else {
        error!(error = %err, "Dashboard request failed");
    }
    metrics::counter!("api.errors", "code" => code).increment(1);

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        data_loaded: state.data.date_bounds().is_some(),
        business_rows: state.data.business().len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Ready once business data is available.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to serve"),
        (status = 503, description = "No business data loaded"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.data.date_bounds().is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub data_loaded: bool,
    pub business_rows: usize,
    pub uptime_secs: u64,
}
