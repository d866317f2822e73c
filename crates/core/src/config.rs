use crate::error::DashboardResult;
use crate::types::Platform;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root application configuration. Loaded from an optional
/// `marketing-dashboard.toml` and environment variables with the prefix
/// `MARKETING_DASHBOARD__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

/// Location of the four input tables.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_business_file")]
    pub business_file: String,
    #[serde(default = "default_facebook_file")]
    pub facebook_file: String,
    #[serde(default = "default_google_file")]
    pub google_file: String,
    #[serde(default = "default_tiktok_file")]
    pub tiktok_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Number of campaigns shown in the per-platform ranking.
    #[serde(default = "default_top_campaigns")]
    pub top_campaigns: usize,
}

// Default functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_http_port() -> u16 {
    8501
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_business_file() -> String {
    "business.csv".to_string()
}
fn default_facebook_file() -> String {
    Platform::Facebook.default_file_name().to_string()
}
fn default_google_file() -> String {
    Platform::Google.default_file_name().to_string()
}
fn default_tiktok_file() -> String {
    Platform::TikTok.default_file_name().to_string()
}
fn default_metrics_enabled() -> bool {
    false
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_top_campaigns() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            business_file: default_business_file(),
            facebook_file: default_facebook_file(),
            google_file: default_google_file(),
            tiktok_file: default_tiktok_file(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_campaigns: default_top_campaigns(),
        }
    }
}

impl DataConfig {
    /// Config rooted at `dir` with the standard file names.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn business_path(&self) -> PathBuf {
        self.dir.join(&self.business_file)
    }

    pub fn platform_path(&self, platform: Platform) -> PathBuf {
        let file = match platform {
            Platform::Facebook => &self.facebook_file,
            Platform::Google => &self.google_file,
            Platform::TikTok => &self.tiktok_file,
        };
        self.dir.join(file)
    }

    /// Every input path, business table first.
    pub fn all_paths(&self) -> Vec<PathBuf> {
        std::iter::once(self.business_path())
            .chain(Platform::ALL.iter().map(|p| self.platform_path(*p)))
            .collect()
    }

    /// Input files that do not exist on disk.
    pub fn missing_files(&self) -> Vec<PathBuf> {
        self.all_paths()
            .into_iter()
            .filter(|p| !Path::new(p).is_file())
            .collect()
    }
}

impl AppConfig {
    /// Load configuration from an optional config file and environment variables.
    pub fn load() -> DashboardResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("marketing-dashboard").required(false))
            .add_source(
                config::Environment::with_prefix("MARKETING_DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_config(builder.build()?)
    }

    fn from_config(config: config::Config) -> DashboardResult<Self> {
        Ok(config.try_deserialize()?)
    }
}
