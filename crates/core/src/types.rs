use crate::error::{DashboardError, DashboardResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Ad platforms with a marketing export.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema,
)]
pub enum Platform {
    Facebook,
    Google,
    TikTok,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Facebook, Platform::Google, Platform::TikTok];

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Google => "Google",
            Platform::TikTok => "TikTok",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook.csv",
            Platform::Google => "Google.csv",
            Platform::TikTok => "TikTok.csv",
        }
    }

    /// Parse a comma-separated platform list such as `"facebook,TikTok"`.
    /// Duplicates are collapsed and the result is in `Platform::ALL` order,
    /// whatever order the names were given in.
    pub fn parse_list(list: &str) -> DashboardResult<Vec<Platform>> {
        let mut platforms = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<DashboardResult<Vec<Platform>>>()?;
        platforms.sort();
        platforms.dedup();
        Ok(platforms)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facebook" => Ok(Platform::Facebook),
            "google" => Ok(Platform::Google),
            "tiktok" => Ok(Platform::TikTok),
            _ => Err(DashboardError::UnknownPlatform(s.to_string())),
        }
    }
}

/// One day of company-wide performance from `business.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub date: NaiveDate,
    pub orders: u64,
    pub new_orders: u64,
    pub new_customers: u64,
    pub total_revenue: f64,
    pub gross_profit: f64,
    pub cogs: f64,
}

/// One (campaign, day) row of a platform export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingRecord {
    pub date: NaiveDate,
    pub campaign_id: String,
    pub tactic: Option<String>,
    pub state: Option<String>,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub impressions: u64,
    pub clicks: u64,
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DashboardResult<Self> {
        if start > end {
            return Err(DashboardError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn filter_business<'a>(&self, rows: &'a [BusinessRecord]) -> Vec<&'a BusinessRecord> {
        rows.iter().filter(|r| self.contains(r.date)).collect()
    }

    pub fn filter_marketing<'a>(&self, rows: &'a [MarketingRecord]) -> Vec<&'a MarketingRecord> {
        rows.iter().filter(|r| self.contains(r.date)).collect()
    }
}
