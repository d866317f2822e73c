//! Dashboard overview: KPI cards and key insights across selected platforms.

use crate::metrics::{calculate_platform_metrics, guarded_ratio, PlatformMetricSummary};
use dashboard_core::{BusinessRecord, MarketingRecord, Platform};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub total_revenue: f64,
    pub new_customers: u64,
    pub total_spend: f64,
    pub total_attributed_revenue: f64,
    /// Attributed revenue over spend across all selected platforms.
    pub overall_roas: f64,
    /// Unweighted mean of the per-platform ROAS values.
    pub avg_roas: f64,
    pub total_impressions: u64,
    pub best_platform: Option<Platform>,
    pub platforms: Vec<PlatformMetricSummary>,
}

/// Build the overview from windowed business rows and the windowed
/// marketing table of each selected platform, in selection order.
pub fn build_overview(
    business: &[BusinessRecord],
    selected: &[(Platform, &[MarketingRecord])],
) -> DashboardOverview {
    let platforms: Vec<PlatformMetricSummary> = selected
        .iter()
        .map(|(platform, rows)| calculate_platform_metrics(business, rows, *platform))
        .collect();

    let total_spend: f64 = platforms.iter().map(|p| p.total_spend).sum();
    let total_attributed_revenue: f64 = platforms.iter().map(|p| p.attributed_revenue).sum();
    let avg_roas = if platforms.is_empty() {
        0.0
    } else {
        platforms.iter().map(|p| p.roas).sum::<f64>() / platforms.len() as f64
    };

    // First platform wins ties.
    let best_platform = platforms
        .iter()
        .fold(None::<&PlatformMetricSummary>, |best, p| match best {
            Some(b) if b.roas >= p.roas => Some(b),
            _ => Some(p),
        })
        .map(|p| p.platform);

    let overview = DashboardOverview {
        total_revenue: business.iter().map(|r| r.total_revenue).sum(),
        new_customers: business.iter().map(|r| r.new_customers).sum(),
        total_spend,
        total_attributed_revenue,
        overall_roas: guarded_ratio(total_attributed_revenue, total_spend),
        avg_roas,
        total_impressions: platforms.iter().map(|p| p.impressions).sum(),
        best_platform,
        platforms,
    };

    tracing::debug!(
        platforms = overview.platforms.len(),
        total_spend = overview.total_spend,
        overall_roas = overview.overall_roas,
        "Overview computed"
    );

    overview
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn business(revenue: f64, customers: u64) -> BusinessRecord {
        BusinessRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            orders: 0,
            new_orders: 0,
            new_customers: customers,
            total_revenue: revenue,
            gross_profit: 0.0,
            cogs: 0.0,
        }
    }

    fn marketing(spend: f64, revenue: f64, impressions: u64) -> MarketingRecord {
        MarketingRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            campaign_id: "c".to_string(),
            tactic: None,
            state: None,
            spend,
            attributed_revenue: revenue,
            impressions,
            clicks: 1,
        }
    }

    #[test]
    fn test_overview_combines_platforms() {
        let business = vec![business(1000.0, 4), business(500.0, 2)];
        let facebook = vec![marketing(100.0, 300.0, 1000)];
        let google = vec![marketing(300.0, 300.0, 2000)];

        let overview = build_overview(
            &business,
            &[
                (Platform::Facebook, facebook.as_slice()),
                (Platform::Google, google.as_slice()),
            ],
        );

        assert!((overview.total_revenue - 1500.0).abs() < f64::EPSILON);
        assert_eq!(overview.new_customers, 6);
        assert!((overview.total_spend - 400.0).abs() < f64::EPSILON);
        assert!((overview.overall_roas - 1.5).abs() < f64::EPSILON);
        assert!((overview.avg_roas - 2.0).abs() < f64::EPSILON);
        assert_eq!(overview.total_impressions, 3000);
        assert_eq!(overview.best_platform, Some(Platform::Facebook));
        assert_eq!(overview.platforms.len(), 2);
    }

    #[test]
    fn test_no_platforms_selected() {
        let overview = build_overview(&[business(10.0, 1)], &[]);

        assert_eq!(overview.total_spend, 0.0);
        assert_eq!(overview.overall_roas, 0.0);
        assert_eq!(overview.avg_roas, 0.0);
        assert_eq!(overview.best_platform, None);
        assert!((overview.total_revenue - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_best_platform_tie_goes_to_first() {
        let a = vec![marketing(10.0, 20.0, 1)];
        let b = vec![marketing(5.0, 10.0, 1)];

        let overview = build_overview(
            &[],
            &[(Platform::TikTok, a.as_slice()), (Platform::Google, b.as_slice())],
        );

        assert_eq!(overview.best_platform, Some(Platform::TikTok));
    }
}
