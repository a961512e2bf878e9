use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;
use super::quote::{is_valid_currency, normalize_currency};

/// Session configuration. Not part of the snapshot document.
///
/// Every field has a default, so a partial JSON config (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The currency all valuations are expressed in (e.g., "JPY", "USD").
    pub reporting_currency: String,

    /// Percentage move of an FX pair that raises a Warning notification.
    pub fx_move_threshold_pct: Decimal,

    /// Native-currency hints for the Yahoo Finance adapter.
    /// Keys are either a full ticker ("GLD") or a suffix starting with
    /// '.' or '-' (".T", "-USD"); values are currency codes.
    pub currency_hints: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut currency_hints = HashMap::new();
        currency_hints.insert(".T".to_string(), "JPY".to_string());
        currency_hints.insert("-USD".to_string(), "USD".to_string());
        Self {
            reporting_currency: "JPY".to_string(),
            fx_move_threshold_pct: Decimal::TWO,
            currency_hints,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::ValidationError(format!("Invalid settings: {e}")))?;
        settings.normalize()?;
        Ok(settings)
    }

    /// Upper-case currency codes and reject anything that is not a 3-letter code
    /// or a negative threshold.
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        if !is_valid_currency(&self.reporting_currency) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., JPY, USD, EUR)",
                self.reporting_currency
            )));
        }
        self.reporting_currency = normalize_currency(&self.reporting_currency);

        if self.fx_move_threshold_pct < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "fx_move_threshold_pct must not be negative (got {})",
                self.fx_move_threshold_pct
            )));
        }

        for (key, code) in self.currency_hints.iter_mut() {
            if !is_valid_currency(code) {
                return Err(CoreError::ValidationError(format!(
                    "Invalid currency hint '{code}' for '{key}'"
                )));
            }
            *code = normalize_currency(code);
        }
        Ok(())
    }
}
