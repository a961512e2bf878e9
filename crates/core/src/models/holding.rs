use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A position the user holds: an equity, ETF, commodity fund or crypto coin.
///
/// Tickers are the identity of a holding. The holding set never contains two
/// entries with the same ticker; see `HoldingService` for the edit rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker as understood by the price oracle (e.g., "VTI", "7203.T", "BTC-USD")
    pub ticker: String,

    /// Human-readable name (e.g., "Vanguard Total Stock", "Toyota Motor")
    pub display_name: String,

    /// Free-form allocation bucket (e.g., "US ETF", "Japan Equity", "Crypto").
    /// Categories are not a fixed set; they are derived from whatever holdings exist.
    pub category: String,

    /// Units held (shares, coins, ounces). Never negative.
    pub quantity: Decimal,

    /// Desired share of the investable total, in `[0, 1]`.
    pub target_ratio: Decimal,
}

impl Holding {
    pub fn new(
        ticker: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        quantity: Decimal,
        target_ratio: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into().trim().to_string(),
            display_name: display_name.into(),
            category: category.into(),
            quantity,
            target_ratio,
        }
    }

    /// Check the per-field invariants. Returns a human-readable reason on failure.
    pub fn check(&self) -> Result<(), String> {
        if self.ticker.trim().is_empty() {
            return Err("ticker must not be empty".into());
        }
        if self.quantity < Decimal::ZERO {
            return Err(format!(
                "quantity for {} must not be negative (got {})",
                self.ticker, self.quantity
            ));
        }
        if self.target_ratio < Decimal::ZERO || self.target_ratio > Decimal::ONE {
            return Err(format!(
                "target_ratio for {} must be within [0, 1] (got {})",
                self.ticker, self.target_ratio
            ));
        }
        Ok(())
    }
}
