use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Data file {path} could not be read: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unparseable date '{value}' in {path}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Unparseable value '{value}' in column '{column}' of {path}")]
    InvalidNumber {
        path: PathBuf,
        column: &'static str,
        value: String,
    },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDateParam(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("No platforms selected")]
    EmptySelection,

    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("No business data loaded")]
    NoData,
}

impl DashboardError {
    /// Errors caused by the caller's filter selection rather than the data.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidDateParam(_)
                | DashboardError::InvalidDateRange { .. }
                | DashboardError::EmptySelection
                | DashboardError::UnknownPlatform(_)
        )
    }
}
