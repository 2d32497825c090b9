//! Shared types and utilities used across all domain modules.
//!
//! `Asset` serializes identically to the path segment the backend expects, so it
//! can be used directly in URLs and wire types without conversion.

pub mod fmt;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Day range used when nothing else is configured.
pub const DEFAULT_DAYS: u32 = 7;

// ─── Asset ───────────────────────────────────────────────────────────────────

/// One of the two tracked instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Btc,
    Sp500,
}

impl Asset {
    /// Both assets, in display order.
    pub const ALL: [Asset; 2] = [Asset::Btc, Asset::Sp500];

    /// Path segment and element-id prefix (`btc`, `sp500`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Sp500 => "sp500",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Btc => "Bitcoin",
            Self::Sp500 => "S&P 500",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Sp500 => "SPX",
        }
    }

    /// The extra figure shown on this asset's card.
    pub fn secondary_metric(&self) -> SecondaryMetric {
        match self {
            Self::Btc => SecondaryMetric::MarketCap,
            Self::Sp500 => SecondaryMetric::PrevClose,
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "btc" => Ok(Self::Btc),
            "sp500" | "spx" => Ok(Self::Sp500),
            other => Err(format!("Invalid symbol: {}", other)),
        }
    }
}

// ─── SecondaryMetric ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryMetric {
    /// Market capitalisation, shown abbreviated (`$1.23T`).
    MarketCap,
    /// Previous session close, shown as a price.
    PrevClose,
}

impl SecondaryMetric {
    /// Suffix of the display element id (`btc-mcap`, `sp500-prev`).
    pub fn element_suffix(&self) -> &'static str {
        match self {
            Self::MarketCap => "mcap",
            Self::PrevClose => "prev",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketCap => "Market Cap",
            Self::PrevClose => "Prev Close",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_parse_accepts_spx_alias() {
        assert_eq!("btc".parse::<Asset>().unwrap(), Asset::Btc);
        assert_eq!("SP500".parse::<Asset>().unwrap(), Asset::Sp500);
        assert_eq!("spx".parse::<Asset>().unwrap(), Asset::Sp500);
        assert!("eth".parse::<Asset>().is_err());
    }

    #[test]
    fn test_asset_serde() {
        let json = serde_json::to_string(&Asset::Sp500).unwrap();
        assert_eq!(json, "\"sp500\"");
        let back: Asset = serde_json::from_str("\"btc\"").unwrap();
        assert_eq!(back, Asset::Btc);
    }

    #[test]
    fn test_secondary_metric_per_asset() {
        assert_eq!(Asset::Btc.secondary_metric(), SecondaryMetric::MarketCap);
        assert_eq!(Asset::Sp500.secondary_metric(), SecondaryMetric::PrevClose);
        assert_eq!(Asset::Sp500.secondary_metric().element_suffix(), "prev");
    }
}
