use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalize a currency code to the canonical upper-case form.
pub fn normalize_currency(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Check a currency code is exactly three ASCII letters (e.g., USD, JPY, EUR).
pub fn is_valid_currency(code: &str) -> bool {
    let trimmed = code.trim();
    trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic())
}

/// A raw market quote in the instrument's native currency.
///
/// The native currency is resolved once by the oracle adapter that produced
/// the quote. Nothing downstream inspects the ticker to guess it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub ticker: String,
    pub native_price: Decimal,
    pub native_currency: String,
}

impl Quote {
    pub fn new(ticker: impl Into<String>, native_price: Decimal, native_currency: &str) -> Self {
        Self {
            ticker: ticker.into(),
            native_price,
            native_currency: normalize_currency(native_currency),
        }
    }
}

/// Exchange rate: 1 unit of `from_currency` = `rate` units of `to_currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(from_currency: &str, to_currency: &str, rate: Decimal) -> Self {
        Self {
            from_currency: normalize_currency(from_currency),
            to_currency: normalize_currency(to_currency),
            rate,
        }
    }
}

/// The set of exchange rates available for one computation cycle.
///
/// Only positive rates are stored. Lookups fall back to the inverse pair
/// when only the opposite direction was supplied.
#[derive(Debug, Clone, Default)]
pub struct FxTable {
    rates: HashMap<(String, String), Decimal>,
}

impl FxTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rates(rates: impl IntoIterator<Item = ExchangeRate>) -> Self {
        let mut table = Self::new();
        for rate in rates {
            table.insert(rate);
        }
        table
    }

    /// Add or replace a rate. Non-positive rates are skipped.
    pub fn insert(&mut self, rate: ExchangeRate) {
        if rate.rate <= Decimal::ZERO {
            warn!(
                "Ignoring non-positive FX rate {} for {}->{}",
                rate.rate, rate.from_currency, rate.to_currency
            );
            return;
        }
        self.rates
            .insert((rate.from_currency, rate.to_currency), rate.rate);
    }

    /// Rate converting `from` into `to`, if known directly or via the inverse pair.
    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        let from = normalize_currency(from);
        let to = normalize_currency(to);
        if from == to {
            return Some(Decimal::ONE);
        }
        if let Some(rate) = self.rates.get(&(from.clone(), to.clone())) {
            return Some(*rate);
        }
        self.rates
            .get(&(to, from))
            .and_then(|inverse| Decimal::ONE.checked_div(*inverse))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Quotes and rates supplied for a single computation cycle. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    /// ticker → quote
    pub quotes: HashMap<String, Quote>,
    pub fx: FxTable,
    /// Human-readable reasons for quotes or rates the oracle could not supply.
    pub failures: Vec<String>,
}

impl MarketData {
    pub fn new(quotes: impl IntoIterator<Item = Quote>, rates: impl IntoIterator<Item = ExchangeRate>) -> Self {
        Self {
            quotes: quotes.into_iter().map(|q| (q.ticker.clone(), q)).collect(),
            fx: FxTable::from_rates(rates),
            failures: Vec::new(),
        }
    }
}
