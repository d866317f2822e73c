//! Load-once data context shared by every request.

use crate::parse::{BusinessRow, MarketingRow};
use chrono::NaiveDate;
use dashboard_core::config::DataConfig;
use dashboard_core::{
    BusinessRecord, DashboardError, DashboardResult, DateWindow, MarketingRecord, Platform,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Immutable snapshot of the four input tables, sorted by date.
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    business: Vec<BusinessRecord>,
    marketing: BTreeMap<Platform, Vec<MarketingRecord>>,
}

impl DataContext {
    /// Read every configured file. Any missing or malformed file fails the load.
    pub fn load(config: &DataConfig) -> DashboardResult<Self> {
        let business_path = config.business_path();
        let business = read_table::<BusinessRow, _>(&business_path, |row| {
            row.into_record(&business_path)
        })?;

        let mut marketing = BTreeMap::new();
        for platform in Platform::ALL {
            let path = config.platform_path(platform);
            let rows = read_table::<MarketingRow, _>(&path, |row| row.into_record(&path))?;
            info!(platform = %platform, rows = rows.len(), path = %path.display(), "Platform data loaded");
            marketing.insert(platform, rows);
        }

        info!(
            business_rows = business.len(),
            path = %business_path.display(),
            "Business data loaded"
        );

        Ok(Self::from_parts(business, marketing))
    }

    /// Build a context from already-parsed tables.
    pub fn from_parts(
        mut business: Vec<BusinessRecord>,
        mut marketing: BTreeMap<Platform, Vec<MarketingRecord>>,
    ) -> Self {
        business.sort_by_key(|r| r.date);
        for platform in Platform::ALL {
            marketing.entry(platform).or_default();
        }
        for rows in marketing.values_mut() {
            rows.sort_by_key(|r| r.date);
        }
        Self {
            business,
            marketing,
        }
    }

    pub fn business(&self) -> &[BusinessRecord] {
        &self.business
    }

    pub fn marketing(&self, platform: Platform) -> &[MarketingRecord] {
        self.marketing
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Earliest and latest business dates, if any rows exist.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.business.first()?;
        let last = self.business.last()?;
        Some((first.date, last.date))
    }

    /// Window spanning all business data.
    pub fn full_window(&self) -> DashboardResult<DateWindow> {
        let (start, end) = self.date_bounds().ok_or(DashboardError::NoData)?;
        DateWindow::new(start, end)
    }

    pub fn business_in(&self, window: &DateWindow) -> Vec<BusinessRecord> {
        window.filter_business(&self.business).into_iter().cloned().collect()
    }

    pub fn marketing_in(&self, platform: Platform, window: &DateWindow) -> Vec<MarketingRecord> {
        window
            .filter_marketing(self.marketing(platform))
            .into_iter()
            .cloned()
            .collect()
    }
}

fn read_table<Row, Record>(
    path: &Path,
    convert: impl Fn(Row) -> DashboardResult<Record>,
) -> DashboardResult<Vec<Record>>
where
    Row: DeserializeOwned,
{
    let file = File::open(path).map_err(|source| DashboardError::DataFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for row in reader.deserialize::<Row>() {
        let row = row.map_err(|source| DashboardError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(convert(row)?);
    }

    debug!(path = %path.display(), rows = records.len(), "CSV table read");
    Ok(records)
}
