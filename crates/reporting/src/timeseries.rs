//! Per-day series: marketing aggregates outer-joined with business totals.

use crate::metrics::ratio;
use chrono::NaiveDate;
use dashboard_core::{BusinessRecord, DateWindow, MarketingRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One calendar day of combined platform and business performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyCombinedMetric {
    pub date: NaiveDate,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub clicks: u64,
    pub total_revenue: f64,
    pub new_customers: u64,
    /// Undefined on days without spend, so charts show a gap.
    pub roas: Option<f64>,
}

impl DailyCombinedMetric {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            spend: 0.0,
            attributed_revenue: 0.0,
            clicks: 0,
            total_revenue: 0.0,
            new_customers: 0,
            roas: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueTrendPoint {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub gross_profit: f64,
}

/// Group both tables by day within `window` and full-outer-join them.
/// The result holds one row per date seen on either side, ascending.
pub fn daily_combined(
    business: &[BusinessRecord],
    marketing: &[MarketingRecord],
    window: &DateWindow,
) -> Vec<DailyCombinedMetric> {
    let mut days: BTreeMap<NaiveDate, DailyCombinedMetric> = BTreeMap::new();

    for row in marketing.iter().filter(|r| window.contains(r.date)) {
        let day = days
            .entry(row.date)
            .or_insert_with(|| DailyCombinedMetric::empty(row.date));
        day.spend += row.spend;
        day.attributed_revenue += row.attributed_revenue;
        day.clicks += row.clicks;
    }

    for row in business.iter().filter(|r| window.contains(r.date)) {
        let day = days
            .entry(row.date)
            .or_insert_with(|| DailyCombinedMetric::empty(row.date));
        day.total_revenue += row.total_revenue;
        day.new_customers += row.new_customers;
    }

    days.into_values()
        .map(|mut day| {
            day.roas = ratio(day.attributed_revenue, day.spend);
            day
        })
        .collect()
}

/// Business revenue and gross profit per row within `window`, ascending.
pub fn revenue_trend(business: &[BusinessRecord], window: &DateWindow) -> Vec<RevenueTrendPoint> {
    let mut points: Vec<RevenueTrendPoint> = business
        .iter()
        .filter(|r| window.contains(r.date))
        .map(|r| RevenueTrendPoint {
            date: r.date,
            total_revenue: r.total_revenue,
            gross_profit: r.gross_profit,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
