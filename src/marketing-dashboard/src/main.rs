//! Marketing Intelligence Dashboard — platform spend and revenue analytics.
//!
//! Loads the business and ad-platform exports once, then serves the
//! dashboard page and its report endpoints.

use clap::Parser;
use dashboard_api::ApiServer;
use dashboard_core::config::AppConfig;
use dashboard_data::DataContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "marketing-dashboard")]
#[command(about = "Marketing spend and revenue analytics dashboard")]
#[command(version)]
struct Cli {
    /// Directory holding business.csv and the platform exports (overrides config)
    #[arg(long, env = "MARKETING_DASHBOARD__DATA__DIR")]
    data_dir: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long, env = "MARKETING_DASHBOARD__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "MARKETING_DASHBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Verify the data files load, then exit
    #[arg(long, default_value_t = false)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "marketing_dashboard=info,dashboard_data=info,dashboard_api=info,tower_http=info"
                    .into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Marketing dashboard starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        data_dir = %config.data.dir.display(),
        host = %config.api.host,
        http_port = config.api.http_port,
        "Configuration loaded"
    );

    let missing = config.data.missing_files();
    if !missing.is_empty() {
        for path in &missing {
            error!(path = %path.display(), "Missing data file");
        }
        anyhow::bail!("{} data file(s) missing", missing.len());
    }

    // Load all tables once; every request reads this snapshot.
    let data = match DataContext::load(&config.data) {
        Ok(data) => Arc::new(data),
        Err(e) => {
            error!(error = %e, "Failed to load data");
            return Err(e.into());
        }
    };

    if let Some((start, end)) = data.date_bounds() {
        info!(start = %start, end = %end, "Business data range");
    } else {
        warn!("Business table is empty; reports will be unavailable");
    }

    if cli.check {
        info!("Data check passed");
        return Ok(());
    }

    let api_server = ApiServer::new(config, data);

    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Marketing dashboard is ready");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
