//! Cell-level parsing for the exported CSV files.

use chrono::{NaiveDate, NaiveDateTime};
use dashboard_core::{BusinessRecord, DashboardError, DashboardResult, MarketingRecord};
use serde::Deserialize;
use std::path::Path;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A `business.csv` row as it appears on disk.
#[derive(Debug, Deserialize)]
pub struct BusinessRow {
    pub date: String,
    #[serde(rename = "# of orders", default)]
    pub orders: Option<String>,
    #[serde(rename = "# of new orders", default)]
    pub new_orders: Option<String>,
    #[serde(rename = "new customers", default)]
    pub new_customers: Option<String>,
    #[serde(rename = "total revenue", default)]
    pub total_revenue: Option<String>,
    #[serde(rename = "gross profit", default)]
    pub gross_profit: Option<String>,
    #[serde(rename = "COGS", default)]
    pub cogs: Option<String>,
}

/// A platform export row as it appears on disk.
#[derive(Debug, Deserialize)]
pub struct MarketingRow {
    pub date: String,
    #[serde(default)]
    pub tactic: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub campaign: String,
    #[serde(rename = "impression", default)]
    pub impressions: Option<String>,
    #[serde(default)]
    pub clicks: Option<String>,
    #[serde(default)]
    pub spend: Option<String>,
    #[serde(rename = "attributed revenue", default)]
    pub attributed_revenue: Option<String>,
}

/// Parse a date cell. A trailing time component is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a money/amount cell. Empty cells count as zero.
pub fn parse_amount(value: Option<&str>) -> Option<f64> {
    let cleaned: String = value
        .unwrap_or_default()
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a count cell. Accepts integral floats such as `12.0`.
pub fn parse_count(value: Option<&str>) -> Option<u64> {
    let amount = parse_amount(value)?;
    if amount < 0.0 || amount.fract() != 0.0 {
        return None;
    }
    Some(amount as u64)
}

fn amount(path: &Path, column: &'static str, value: Option<&str>) -> DashboardResult<f64> {
    parse_amount(value).ok_or_else(|| invalid_number(path, column, value))
}

fn count(path: &Path, column: &'static str, value: Option<&str>) -> DashboardResult<u64> {
    parse_count(value).ok_or_else(|| invalid_number(path, column, value))
}

fn date(path: &Path, value: &str) -> DashboardResult<NaiveDate> {
    parse_date(value).ok_or_else(|| DashboardError::InvalidDate {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

fn invalid_number(path: &Path, column: &'static str, value: Option<&str>) -> DashboardError {
    DashboardError::InvalidNumber {
        path: path.to_path_buf(),
        column,
        value: value.unwrap_or_default().to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl BusinessRow {
    pub fn into_record(self, path: &Path) -> DashboardResult<BusinessRecord> {
        Ok(BusinessRecord {
            date: date(path, &self.date)?,
            orders: count(path, "# of orders", self.orders.as_deref())?,
            new_orders: count(path, "# of new orders", self.new_orders.as_deref())?,
            new_customers: count(path, "new customers", self.new_customers.as_deref())?,
            total_revenue: amount(path, "total revenue", self.total_revenue.as_deref())?,
            gross_profit: amount(path, "gross profit", self.gross_profit.as_deref())?,
            cogs: amount(path, "COGS", self.cogs.as_deref())?,
        })
    }
}

impl MarketingRow {
    pub fn into_record(self, path: &Path) -> DashboardResult<MarketingRecord> {
        Ok(MarketingRecord {
            date: date(path, &self.date)?,
            campaign_id: self.campaign.trim().to_string(),
            spend: amount(path, "spend", self.spend.as_deref())?,
            attributed_revenue: amount(
                path,
                "attributed revenue",
                self.attributed_revenue.as_deref(),
            )?,
            impressions: count(path, "impression", self.impressions.as_deref())?,
            clicks: count(path, "clicks", self.clicks.as_deref())?,
            tactic: non_empty(self.tactic),
            state: non_empty(self.state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_date("2024-03-07"), Some(expected));
        assert_eq!(parse_date("2024/03/07"), Some(expected));
        assert_eq!(parse_date("03/07/2024"), Some(expected));
        assert_eq!(parse_date(" 2024-03-07 13:45:00 "), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(Some("1,234.50")), Some(1234.5));
        assert_eq!(parse_amount(Some("$99")), Some(99.0));
        assert_eq!(parse_amount(Some("  ")), Some(0.0));
        assert_eq!(parse_amount(None), Some(0.0));
        assert_eq!(parse_amount(Some("n/a")), None);
        assert_eq!(parse_amount(Some("inf")), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("42")), Some(42));
        assert_eq!(parse_count(Some("42.0")), Some(42));
        assert_eq!(parse_count(Some("")), Some(0));
        assert_eq!(parse_count(Some("4.5")), None);
        assert_eq!(parse_count(Some("-3")), None);
    }

    #[test]
    fn test_marketing_row_conversion() {
        let row = MarketingRow {
            date: "2024-01-02".to_string(),
            tactic: Some("ASC".to_string()),
            state: Some(" ".to_string()),
            campaign: " Spring Sale ".to_string(),
            impressions: Some("1000".to_string()),
            clicks: Some("20".to_string()),
            spend: Some("100".to_string()),
            attributed_revenue: Some("250.5".to_string()),
        };
        let record = row.into_record(Path::new("Facebook.csv")).unwrap();
        assert_eq!(record.campaign_id, "Spring Sale");
        assert_eq!(record.tactic.as_deref(), Some("ASC"));
        assert_eq!(record.state, None);
        assert_eq!(record.impressions, 1000);
        assert!((record.attributed_revenue - 250.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_cell_names_column_and_file() {
        let row = BusinessRow {
            date: "2024-01-02".to_string(),
            orders: None,
            new_orders: None,
            new_customers: Some("many".to_string()),
            total_revenue: Some("10".to_string()),
            gross_profit: None,
            cogs: None,
        };
        let err = row.into_record(Path::new("business.csv")).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidNumber { column: "new customers", .. }
        ));
    }
}
