//! Per-campaign aggregation and ROAS ranking.

use crate::metrics::ratio;
use dashboard_core::MarketingRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Default ranking length.
pub const TOP_CAMPAIGNS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub clicks: u64,
    pub impressions: u64,
    /// Undefined when the campaign had no spend.
    pub roas: Option<f64>,
    /// Undefined when the campaign had no impressions.
    pub ctr: Option<f64>,
}

/// Group rows by campaign, in campaign-id order.
pub fn summarize_campaigns(marketing: &[MarketingRecord]) -> Vec<CampaignSummary> {
    let mut groups: BTreeMap<&str, CampaignSummary> = BTreeMap::new();

    for row in marketing {
        let summary = groups
            .entry(row.campaign_id.as_str())
            .or_insert_with(|| CampaignSummary {
                campaign_id: row.campaign_id.clone(),
                spend: 0.0,
                attributed_revenue: 0.0,
                clicks: 0,
                impressions: 0,
                roas: None,
                ctr: None,
            });
        summary.spend += row.spend;
        summary.attributed_revenue += row.attributed_revenue;
        summary.clicks += row.clicks;
        summary.impressions += row.impressions;
    }

    groups
        .into_values()
        .map(|mut s| {
            s.roas = ratio(s.attributed_revenue, s.spend);
            s.ctr = ratio(s.clicks as f64, s.impressions as f64).map(|v| v * 100.0);
            s
        })
        .collect()
}

/// The `limit` campaigns with the highest ROAS, descending. The sort is
/// stable, and campaigns with undefined ROAS rank last. A zero-spend
/// campaign that still has attributed revenue counts as undefined, not as
/// infinite ROAS, so it sits at the bottom rather than the top and is the
/// first to be cut by `limit`.
pub fn rank_campaigns(marketing: &[MarketingRecord], limit: usize) -> Vec<CampaignSummary> {
    let mut campaigns = summarize_campaigns(marketing);
    campaigns.sort_by(|a, b| compare_roas_desc(a.roas, b.roas));
    campaigns.truncate(limit);
    campaigns
}

fn compare_roas_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::calculate_platform_metrics;
    use chrono::NaiveDate;
    use dashboard_core::Platform;

    fn row(campaign: &str, day: u32, spend: f64, revenue: f64) -> MarketingRecord {
        MarketingRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            campaign_id: campaign.to_string(),
            tactic: None,
            state: None,
            spend,
            attributed_revenue: revenue,
            impressions: 1000,
            clicks: 10,
        }
    }

    #[test]
    fn test_groups_by_campaign() {
        let rows = vec![
            row("beta", 1, 10.0, 30.0),
            row("alpha", 1, 20.0, 20.0),
            row("beta", 2, 10.0, 10.0),
        ];

        let summaries = summarize_campaigns(&rows);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].campaign_id, "alpha");
        let beta = &summaries[1];
        assert!((beta.spend - 20.0).abs() < f64::EPSILON);
        assert_eq!(beta.clicks, 20);
        assert_eq!(beta.impressions, 2000);
        assert_eq!(beta.roas, Some(2.0));
        assert_eq!(beta.ctr, Some(1.0));
    }

    #[test]
    fn test_campaign_spend_sums_to_platform_spend() {
        let rows: Vec<_> = (1..=20)
            .map(|i| row(&format!("c{}", i % 7), i, i as f64 * 3.5, i as f64))
            .collect();

        let campaign_total: f64 = summarize_campaigns(&rows).iter().map(|c| c.spend).sum();
        let platform = calculate_platform_metrics(&[], &rows, Platform::Facebook);

        assert!((campaign_total - platform.total_spend).abs() < 1e-9);
    }

    #[test]
    fn test_rank_returns_top_ten_descending() {
        let rows: Vec<_> = (1..=15)
            .map(|i| row(&format!("c{i:02}"), 1, 10.0, i as f64 * 10.0))
            .collect();

        let top = rank_campaigns(&rows, TOP_CAMPAIGNS);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].campaign_id, "c15");
        assert_eq!(top[9].campaign_id, "c06");
        assert!(top.windows(2).all(|w| w[0].roas >= w[1].roas));
    }

    #[test]
    fn test_ties_keep_group_order() {
        let rows = vec![row("b", 1, 10.0, 20.0), row("a", 1, 10.0, 20.0), row("c", 1, 10.0, 50.0)];

        let top = rank_campaigns(&rows, TOP_CAMPAIGNS);

        let ids: Vec<_> = top.iter().map(|c| c.campaign_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_zero_spend_campaign_ranks_last() {
        let rows = vec![row("free", 1, 0.0, 100.0), row("paid", 1, 10.0, 5.0)];

        let top = rank_campaigns(&rows, TOP_CAMPAIGNS);

        assert_eq!(top[0].campaign_id, "paid");
        assert_eq!(top[1].campaign_id, "free");
        assert_eq!(top[1].roas, None);

        let capped = rank_campaigns(&rows, 1);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].campaign_id, "paid");
    }

    #[test]
    fn test_no_impressions_ctr_undefined() {
        let mut r = row("dark", 1, 10.0, 10.0);
        r.impressions = 0;
        r.clicks = 0;
        let summaries = summarize_campaigns(&[r]);
        assert_eq!(summaries[0].ctr, None);
    }

    #[test]
    fn test_empty_table() {
        assert!(rank_campaigns(&[], TOP_CAMPAIGNS).is_empty());
    }
}
