//! Environment-driven configuration for the native binary.
//!
//! | Variable                 | Default                 |
//! |--------------------------|-------------------------|
//! | `DASHBOARD_API_URL`      | `http://localhost:5000` |
//! | `DASHBOARD_REFRESH_MS`   | `30000`                 |
//! | `DASHBOARD_DAYS`         | `7`                     |
//! | `DASHBOARD_CHART_DIR`    | unset (charts not drawn)|
//! | `DASHBOARD_SKIP_OVERLAP` | `false`                 |

use crate::error::DashboardError;
use crate::network::DEFAULT_API_URL;
use crate::pipeline::CyclePolicy;
use crate::refresh::RefreshConfig;
use crate::shared::DEFAULT_DAYS;
use std::path::PathBuf;

pub const DEFAULT_REFRESH_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub refresh: RefreshConfig,
    pub days: u32,
    /// Where SVG charts are written. `None` disables chart output.
    pub chart_dir: Option<PathBuf>,
    pub skip_overlapping: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh: RefreshConfig::from_millis(DEFAULT_REFRESH_MS),
            days: DEFAULT_DAYS,
            chart_dir: None,
            skip_overlapping: false,
        }
    }
}

impl DashboardConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let refresh = match get("DASHBOARD_REFRESH_MS") {
            Some(raw) => raw.parse::<RefreshConfig>()?,
            None => defaults.refresh,
        };

        let days = match get("DASHBOARD_DAYS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    return Err(DashboardError::Config(format!(
                        "Invalid DASHBOARD_DAYS: {}",
                        raw
                    )))
                }
            },
            None => defaults.days,
        };

        let skip_overlapping = match get("DASHBOARD_SKIP_OVERLAP") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                DashboardError::Config(format!("Invalid DASHBOARD_SKIP_OVERLAP: {}", raw))
            })?,
            None => defaults.skip_overlapping,
        };

        Ok(Self {
            api_url: get("DASHBOARD_API_URL").unwrap_or(defaults.api_url),
            refresh,
            days,
            chart_dir: get("DASHBOARD_CHART_DIR").map(PathBuf::from),
            skip_overlapping,
        })
    }

    pub fn cycle_policy(&self) -> CyclePolicy {
        if self.skip_overlapping {
            CyclePolicy::SkipWhileInFlight
        } else {
            CyclePolicy::Overlap
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
