//! Marketing performance reporting: per-platform KPIs, daily time series,
//! campaign rankings and the dashboard overview.

pub mod campaigns;
pub mod metrics;
pub mod overview;
pub mod timeseries;

pub use campaigns::{rank_campaigns, summarize_campaigns, CampaignSummary};
pub use metrics::{calculate_platform_metrics, PlatformMetricSummary};
pub use overview::{build_overview, DashboardOverview};
pub use timeseries::{daily_combined, revenue_trend, DailyCombinedMetric, RevenueTrendPoint};
