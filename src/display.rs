//! Display surface: the named fields a cycle writes into.
//!
//! The pipeline never touches a document directly; it writes through
//! [`DisplaySurface`]. [`Board`] is the in-memory implementation used by the
//! native front-end and by tests; the WASM front-end binds the same trait to
//! DOM elements.

use crate::domain::status::ConnectionStatus;
use crate::shared::fmt::PLACEHOLDER;
use crate::shared::{Asset, SecondaryMetric};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Sign of a percentage change, driving its visual class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeDirection {
    Positive,
    Negative,
}

impl ChangeDirection {
    /// Non-negative changes are positive; an absent or NaN change is shown as
    /// negative.
    pub fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(v) if v >= 0.0 => Self::Positive,
            _ => Self::Negative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    /// Full class attribute for the change element.
    pub fn css_class(&self) -> String {
        format!("price-change {}", self.as_str())
    }
}

/// Write-only view of the dashboard document.
pub trait DisplaySurface {
    fn set_price(&mut self, asset: Asset, text: &str);

    fn set_change(&mut self, asset: Asset, text: &str, direction: ChangeDirection);

    fn set_secondary(&mut self, asset: Asset, metric: SecondaryMetric, text: &str);

    /// Toggle the error class on the asset's card.
    fn set_card_error(&mut self, asset: Asset, errored: bool);

    fn set_status(&mut self, status: ConnectionStatus);

    fn set_last_update(&mut self, text: &str);

    /// Surface a user-visible error message.
    fn show_error(&mut self, message: &str);
}

// ─── Board ───────────────────────────────────────────────────────────────────

/// Displayed fields of one asset card.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetCard {
    pub price: String,
    pub change: String,
    pub direction: Option<ChangeDirection>,
    pub secondary: String,
    pub errored: bool,
}

impl Default for AssetCard {
    fn default() -> Self {
        Self {
            price: PLACEHOLDER.to_string(),
            change: PLACEHOLDER.to_string(),
            direction: None,
            secondary: PLACEHOLDER.to_string(),
            errored: false,
        }
    }
}

/// In-memory display surface.
#[derive(Debug, Clone)]
pub struct Board {
    cards: BTreeMap<Asset, AssetCard>,
    status: ConnectionStatus,
    last_update: Option<String>,
    last_error: Option<String>,
    errors_shown: u64,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cards: Asset::ALL
                .iter()
                .map(|asset| (*asset, AssetCard::default()))
                .collect(),
            status: ConnectionStatus::default(),
            last_update: None,
            last_error: None,
            errors_shown: 0,
        }
    }

    pub fn card(&self, asset: Asset) -> &AssetCard {
        // Every asset is seeded in `new`.
        &self.cards[&asset]
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn errors_shown(&self) -> u64 {
        self.errors_shown
    }

    fn card_mut(&mut self, asset: Asset) -> &mut AssetCard {
        self.cards.entry(asset).or_default()
    }

    /// Plain-text rendering of every field.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for asset in Asset::ALL {
            let card = self.card(asset);
            let _ = writeln!(
                out,
                "{:<16}{:>14}  {:>8}  {}: {}{}",
                format!("{} ({})", asset.name(), asset.symbol()),
                card.price,
                card.change,
                asset.secondary_metric().label(),
                card.secondary,
                if card.errored { "  [error]" } else { "" },
            );
        }
        let _ = write!(
            out,
            "status: {}  last update: {}",
            self.status,
            self.last_update.as_deref().unwrap_or(PLACEHOLDER)
        );
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for Board {
    fn set_price(&mut self, asset: Asset, text: &str) {
        self.card_mut(asset).price = text.to_string();
    }

    fn set_change(&mut self, asset: Asset, text: &str, direction: ChangeDirection) {
        let card = self.card_mut(asset);
        card.change = text.to_string();
        card.direction = Some(direction);
    }

    fn set_secondary(&mut self, asset: Asset, _metric: SecondaryMetric, text: &str) {
        self.card_mut(asset).secondary = text.to_string();
    }

    fn set_card_error(&mut self, asset: Asset, errored: bool) {
        self.card_mut(asset).errored = errored;
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    fn set_last_update(&mut self, text: &str) {
        self.last_update = Some(text.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
        self.errors_shown += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_direction() {
        assert_eq!(ChangeDirection::from_change(Some(0.0)), ChangeDirection::Positive);
        assert_eq!(ChangeDirection::from_change(Some(-0.01)), ChangeDirection::Negative);
        assert_eq!(ChangeDirection::from_change(None), ChangeDirection::Negative);
        assert_eq!(
            ChangeDirection::from_change(Some(f64::NAN)),
            ChangeDirection::Negative
        );
        assert_eq!(ChangeDirection::Positive.css_class(), "price-change positive");
    }

    #[test]
    fn test_new_board_shows_placeholders() {
        let board = Board::new();
        assert_eq!(board.card(Asset::Btc).price, "--");
        assert_eq!(board.card(Asset::Sp500).secondary, "--");
        assert_eq!(board.last_update(), None);
    }

    #[test]
    fn test_board_records_fields() {
        let mut board = Board::new();
        board.set_price(Asset::Btc, "43,250.50");
        board.set_change(Asset::Btc, "+2.41%", ChangeDirection::Positive);
        board.set_secondary(Asset::Btc, SecondaryMetric::MarketCap, "$847.00B");
        board.set_card_error(Asset::Sp500, true);
        board.set_status(ConnectionStatus::Connected);
        board.set_last_update("02:30:45 PM");

        let btc = board.card(Asset::Btc);
        assert_eq!(btc.price, "43,250.50");
        assert_eq!(btc.direction, Some(ChangeDirection::Positive));
        assert!(board.card(Asset::Sp500).errored);

        let text = board.render();
        assert!(text.contains("Bitcoin (BTC)"));
        assert!(text.contains("$847.00B"));
        assert!(text.contains("[error]"));
        assert!(text.contains("status: connected  last update: 02:30:45 PM"));
    }
}
