//! The dashboard page. A single self-contained HTML document that renders
//! the report endpoints with Plotly.

use axum::http::header;
use axum::response::{Html, IntoResponse};

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

const CACHE_REVALIDATE: &str = "public, max-age=0, must-revalidate";

/// GET / — Serve the dashboard page.
pub async fn serve_dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, CACHE_REVALIDATE)],
        Html(DASHBOARD_HTML),
    )
}
