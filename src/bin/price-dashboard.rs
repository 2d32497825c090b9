//! Terminal dashboard.
//!
//! Polls the price API and prints the board after every cycle. Lines on stdin
//! stand in for the page controls:
//!
//! ```text
//! hide | show        page visibility
//! period <ms>        refresh period (0 disables)
//! days <n>           chart day range
//! refresh            run one cycle now
//! quit
//! ```

use price_dashboard::config::DashboardConfig;
use price_dashboard::native::{self, ConsoleBoard, SvgChartSink};
use price_dashboard::prelude::*;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("price_dashboard=info")),
        )
        .with_target(true)
        .init();

    let config = DashboardConfig::from_env()?;
    tracing::info!(api = %config.api_url, days = config.days, "Starting price dashboard");

    let client = DashboardClient::builder()
        .base_url(&config.api_url)
        .build()?;

    match client.health().await {
        Ok(health) => tracing::info!(status = %health.status, "API reachable"),
        Err(e) => tracing::warn!("API health check failed: {}", e),
    }

    let sink = match &config.chart_dir {
        Some(dir) => Some(SvgChartSink::new(dir)?),
        None => None,
    };
    let state = DashboardState::new(ConsoleBoard::new(), sink, config.days);
    let pipeline = UpdatePipeline::new(client, state).with_policy(config.cycle_policy());

    let mut dashboard = native::dashboard(pipeline);
    dashboard.start(config.refresh);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("hide"), None) => dashboard.on_visibility_change(true),
            (Some("show"), None) => dashboard.on_visibility_change(false),
            (Some("period"), Some(raw)) => {
                let refresh = raw.parse::<RefreshConfig>().unwrap_or_else(|e| {
                    tracing::warn!("{}; refresh disabled", e);
                    RefreshConfig::DISABLED
                });
                dashboard.set_refresh(refresh);
            }
            (Some("days"), Some(raw)) => match raw.parse::<u32>() {
                Ok(days) if days > 0 => {
                    let replaced = dashboard.set_days(days).await;
                    tracing::info!(days, charts = replaced, "Day range changed");
                }
                _ => tracing::warn!("Invalid day range: {}", raw),
            },
            (Some("refresh"), None) => {
                // Errors are already on screen.
                let _ = dashboard.refresh_now().await;
            }
            (Some("quit"), None) => break,
            (None, _) => {}
            _ => eprintln!("commands: hide | show | period <ms> | days <n> | refresh | quit"),
        }
    }

    Ok(())
}
