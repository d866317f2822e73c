//! OpenAPI specification for the dashboard API.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketing Intelligence Dashboard API",
        version = "0.1.0",
        description = "Platform KPIs, daily performance and campaign rankings computed from daily business and ad-platform exports.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Dashboard", description = "Date- and platform-filtered marketing reports"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Dashboard
        crate::report_rest::handle_bounds,
        crate::report_rest::handle_overview,
        crate::report_rest::handle_revenue_trend,
        crate::report_rest::handle_platform_summary,
        crate::report_rest::handle_platform_daily,
        crate::report_rest::handle_platform_campaigns,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Core types
        dashboard_core::Platform,
        // Report types
        dashboard_reporting::PlatformMetricSummary,
        dashboard_reporting::DailyCombinedMetric,
        dashboard_reporting::CampaignSummary,
        dashboard_reporting::DashboardOverview,
        dashboard_reporting::RevenueTrendPoint,
        // REST types
        crate::report_rest::BoundsResponse,
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json — The generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
