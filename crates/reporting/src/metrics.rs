//! Whole-period platform KPIs: spend, attributed revenue, ROAS, CTR, CPC, CPM.

use dashboard_core::{BusinessRecord, MarketingRecord, Platform};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate performance of one platform over a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlatformMetricSummary {
    pub platform: Platform,
    pub total_spend: f64,
    pub attributed_revenue: f64,
    /// `attributed_revenue / total_spend` (0.0 when spend is zero).
    pub roas: f64,
    /// `clicks / impressions * 100` (0.0 without impressions).
    pub ctr: f64,
    /// `total_spend / clicks` (0.0 without clicks).
    pub cpc: f64,
    /// `total_spend / impressions * 1000` (0.0 without impressions).
    pub cpm: f64,
    pub impressions: u64,
    pub clicks: u64,
    /// Business revenue over the same window.
    pub total_revenue: f64,
}

/// `numerator / denominator`, or 0.0 when the denominator is not positive.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `numerator / denominator`, undefined when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Compute the summary for one platform. Both tables must already be
/// restricted to the window of interest.
pub fn calculate_platform_metrics(
    business: &[BusinessRecord],
    marketing: &[MarketingRecord],
    platform: Platform,
) -> PlatformMetricSummary {
    let total_revenue: f64 = business.iter().map(|r| r.total_revenue).sum();
    let total_spend: f64 = marketing.iter().map(|r| r.spend).sum();
    let attributed_revenue: f64 = marketing.iter().map(|r| r.attributed_revenue).sum();
    let impressions: u64 = marketing.iter().map(|r| r.impressions).sum();
    let clicks: u64 = marketing.iter().map(|r| r.clicks).sum();

    PlatformMetricSummary {
        platform,
        total_spend,
        attributed_revenue,
        roas: guarded_ratio(attributed_revenue, total_spend),
        ctr: guarded_ratio(clicks as f64, impressions as f64) * 100.0,
        cpc: guarded_ratio(total_spend, clicks as f64),
        cpm: guarded_ratio(total_spend, impressions as f64) * 1000.0,
        impressions,
        clicks,
        total_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(spend: f64, revenue: f64, impressions: u64, clicks: u64) -> MarketingRecord {
        MarketingRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            campaign_id: "c-1".to_string(),
            tactic: None,
            state: None,
            spend,
            attributed_revenue: revenue,
            impressions,
            clicks,
        }
    }

    #[test]
    fn test_single_row_ratios() {
        let summary =
            calculate_platform_metrics(&[], &[row(100.0, 250.0, 1000, 20)], Platform::Facebook);

        assert!((summary.roas - 2.5).abs() < f64::EPSILON);
        assert!((summary.ctr - 2.0).abs() < f64::EPSILON);
        assert!((summary.cpc - 5.0).abs() < f64::EPSILON);
        assert!((summary.cpm - 100.0).abs() < f64::EPSILON);
        assert_eq!(summary.impressions, 1000);
        assert_eq!(summary.clicks, 20);
    }

    #[test]
    fn test_empty_table_yields_zeros() {
        let summary = calculate_platform_metrics(&[], &[], Platform::TikTok);

        assert_eq!(summary.platform, Platform::TikTok);
        assert_eq!(summary.total_spend, 0.0);
        assert_eq!(summary.roas, 0.0);
        assert_eq!(summary.ctr, 0.0);
        assert_eq!(summary.cpc, 0.0);
        assert_eq!(summary.cpm, 0.0);
    }

    #[test]
    fn test_zero_spend_with_no_traffic_yields_zeros() {
        let summary =
            calculate_platform_metrics(&[], &[row(0.0, 40.0, 0, 0)], Platform::Google);

        assert_eq!(summary.roas, 0.0);
        assert_eq!(summary.ctr, 0.0);
        assert_eq!(summary.cpc, 0.0);
        assert_eq!(summary.cpm, 0.0);
        assert!((summary.attributed_revenue - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sums_over_rows_and_business_revenue() {
        let business = vec![BusinessRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            orders: 3,
            new_orders: 1,
            new_customers: 1,
            total_revenue: 900.0,
            gross_profit: 300.0,
            cogs: 600.0,
        }];
        let marketing = vec![row(100.0, 200.0, 1000, 10), row(300.0, 400.0, 3000, 30)];

        let summary = calculate_platform_metrics(&business, &marketing, Platform::Google);

        assert!((summary.total_spend - 400.0).abs() < f64::EPSILON);
        assert!((summary.roas - 1.5).abs() < f64::EPSILON);
        assert!((summary.ctr - 1.0).abs() < f64::EPSILON);
        assert!((summary.cpc - 10.0).abs() < f64::EPSILON);
        assert!((summary.cpm - 100.0).abs() < f64::EPSILON);
        assert!((summary.total_revenue - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_helpers() {
        assert_eq!(guarded_ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(5.0, 0.0), None);
        assert_eq!(ratio(5.0, 2.0), Some(2.5));
    }
}
