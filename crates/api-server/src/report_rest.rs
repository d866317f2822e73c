//! Dashboard report endpoints. Each call filters the loaded tables by the
//! requested window and recomputes its report from scratch.

use crate::rest::{error_response, ApiResult, AppState, ErrorResponse};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use dashboard_core::{DashboardError, DashboardResult, DateWindow, Platform};
use dashboard_data::DataContext;
use dashboard_reporting::{
    build_overview, calculate_platform_metrics, daily_combined, rank_campaigns, revenue_trend,
    CampaignSummary, DailyCombinedMetric, DashboardOverview, PlatformMetricSummary,
    RevenueTrendPoint,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

/// Date-range and platform filter shared by the report endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// First day of the window, `YYYY-MM-DD` (defaults to the earliest business date).
    pub start: Option<String>,
    /// Last day of the window, inclusive (defaults to the latest business date).
    pub end: Option<String>,
    /// Comma-separated platforms; all platforms when omitted.
    pub platforms: Option<String>,
}

impl DashboardQuery {
    pub fn window(&self, data: &DataContext) -> DashboardResult<DateWindow> {
        let bounds = data.date_bounds();
        let start = parse_day(self.start.as_deref())?.or(bounds.map(|(min, _)| min));
        let end = parse_day(self.end.as_deref())?.or(bounds.map(|(_, max)| max));
        match (start, end) {
            (Some(start), Some(end)) => DateWindow::new(start, end),
            _ => Err(DashboardError::NoData),
        }
    }

    pub fn platforms(&self) -> DashboardResult<Vec<Platform>> {
        let Some(list) = &self.platforms else {
            return Ok(Platform::ALL.to_vec());
        };
        let platforms = Platform::parse_list(list)?;
        if platforms.is_empty() {
            return Err(DashboardError::EmptySelection);
        }
        Ok(platforms)
    }
}

/// An absent or blank date parameter falls back to the data bounds.
fn parse_day(value: Option<&str>) -> DashboardResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| DashboardError::InvalidDateParam(v.to_string())),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoundsResponse {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

/// GET /v1/bounds — Date range covered by the business data.
#[utoipa::path(
    get,
    path = "/v1/bounds",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Business date bounds", body = BoundsResponse),
        (status = 503, description = "No business data loaded", body = ErrorResponse),
    )
)]
pub async fn handle_bounds(State(state): State<AppState>) -> ApiResult<BoundsResponse> {
    let (min_date, max_date) = state
        .data
        .date_bounds()
        .ok_or_else(|| error_response(DashboardError::NoData))?;
    Ok(Json(BoundsResponse { min_date, max_date }))
}

/// GET /v1/overview — KPI cards and platform comparison.
#[utoipa::path(
    get,
    path = "/v1/overview",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Overview for the selection", body = DashboardOverview),
        (status = 404, description = "Unknown platform", body = ErrorResponse),
        (status = 422, description = "Invalid date range or empty selection", body = ErrorResponse),
    )
)]
pub async fn handle_overview(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<DashboardOverview> {
    metrics::counter!("api.requests", "endpoint" => "overview").increment(1);
    let window = query.window(&state.data).map_err(error_response)?;
    let platforms = query.platforms().map_err(error_response)?;

    let business = state.data.business_in(&window);
    let tables: Vec<_> = platforms
        .iter()
        .map(|p| (*p, state.data.marketing_in(*p, &window)))
        .collect();
    let selected: Vec<_> = tables.iter().map(|(p, rows)| (*p, rows.as_slice())).collect();

    debug!(
        start = %window.start,
        end = %window.end,
        platforms = platforms.len(),
        "Building overview"
    );
    Ok(Json(build_overview(&business, &selected)))
}

/// GET /v1/revenue-trend — Daily revenue and gross profit.
#[utoipa::path(
    get,
    path = "/v1/revenue-trend",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Revenue trend", body = [RevenueTrendPoint]),
        (status = 422, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn handle_revenue_trend(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Vec<RevenueTrendPoint>> {
    metrics::counter!("api.requests", "endpoint" => "revenue_trend").increment(1);
    let window = query.window(&state.data).map_err(error_response)?;
    Ok(Json(revenue_trend(state.data.business(), &window)))
}

/// GET /v1/platforms/:platform/summary — Whole-window KPIs for one platform.
#[utoipa::path(
    get,
    path = "/v1/platforms/{platform}/summary",
    tag = "Dashboard",
    params(
        ("platform" = String, Path, description = "Facebook, Google or TikTok"),
        DashboardQuery,
    ),
    responses(
        (status = 200, description = "Platform summary", body = PlatformMetricSummary),
        (status = 404, description = "Unknown platform", body = ErrorResponse),
        (status = 422, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn handle_platform_summary(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<PlatformMetricSummary> {
    metrics::counter!("api.requests", "endpoint" => "platform_summary").increment(1);
    let (platform, window) = resolve(&state, &platform, &query)?;
    let business = state.data.business_in(&window);
    let marketing = state.data.marketing_in(platform, &window);
    Ok(Json(calculate_platform_metrics(&business, &marketing, platform)))
}

/// GET /v1/platforms/:platform/daily — Daily spend, ROAS, revenue and new customers.
#[utoipa::path(
    get,
    path = "/v1/platforms/{platform}/daily",
    tag = "Dashboard",
    params(
        ("platform" = String, Path, description = "Facebook, Google or TikTok"),
        DashboardQuery,
    ),
    responses(
        (status = 200, description = "One row per date, ascending", body = [DailyCombinedMetric]),
        (status = 404, description = "Unknown platform", body = ErrorResponse),
        (status = 422, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn handle_platform_daily(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Vec<DailyCombinedMetric>> {
    metrics::counter!("api.requests", "endpoint" => "platform_daily").increment(1);
    let (platform, window) = resolve(&state, &platform, &query)?;
    Ok(Json(daily_combined(
        state.data.business(),
        state.data.marketing(platform),
        &window,
    )))
}

/// GET /v1/platforms/:platform/campaigns — Top campaigns by ROAS.
#[utoipa::path(
    get,
    path = "/v1/platforms/{platform}/campaigns",
    tag = "Dashboard",
    params(
        ("platform" = String, Path, description = "Facebook, Google or TikTok"),
        DashboardQuery,
    ),
    responses(
        (status = 200, description = "Campaigns, descending ROAS", body = [CampaignSummary]),
        (status = 404, description = "Unknown platform", body = ErrorResponse),
        (status = 422, description = "Invalid date range", body = ErrorResponse),
    )
)]
pub async fn handle_platform_campaigns(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Vec<CampaignSummary>> {
    metrics::counter!("api.requests", "endpoint" => "platform_campaigns").increment(1);
    let (platform, window) = resolve(&state, &platform, &query)?;
    let marketing = state.data.marketing_in(platform, &window);
    Ok(Json(rank_campaigns(&marketing, state.top_campaigns)))
}

fn resolve(
    state: &AppState,
    platform: &str,
    query: &DashboardQuery,
) -> Result<(Platform, DateWindow), (StatusCode, Json<ErrorResponse>)> {
    let platform: Platform = platform.parse().map_err(error_response)?;
    let window = query.window(&state.data).map_err(error_response)?;
    Ok((platform, window))
}
