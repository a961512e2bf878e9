use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::errors::CoreError;
use crate::models::quote::{normalize_currency, ExchangeRate, Quote};
use super::traits::PriceOracle;

/// In-memory oracle backed by quotes and rates registered up front.
///
/// - **Offline**: no network, deterministic.
/// - **Partial**: unknown tickers are left out of `fetch_quotes`.
/// - **Rates**: answers the registered pair or its inverse.
///
/// Useful for manual price entry and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceOracle {
    quotes: HashMap<String, Quote>,
    rates: HashMap<(String, String), Decimal>,
}

impl StaticPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, ticker: &str, price: Decimal, currency: &str) -> Self {
        self.set_quote(Quote::new(ticker, price, currency));
        self
    }

    pub fn with_rate(mut self, from_currency: &str, to_currency: &str, rate: Decimal) -> Self {
        self.set_rate(ExchangeRate::new(from_currency, to_currency, rate));
        self
    }

    pub fn set_quote(&mut self, quote: Quote) {
        self.quotes.insert(quote.ticker.clone(), quote);
    }

    pub fn set_rate(&mut self, rate: ExchangeRate) {
        self.rates
            .insert((rate.from_currency, rate.to_currency), rate.rate);
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceOracle for StaticPriceOracle {
    fn name(&self) -> &str {
        "Static"
    }

    async fn fetch_quotes(
        &self,
        tickers: &BTreeSet<String>,
    ) -> Result<HashMap<String, Quote>, CoreError> {
        Ok(tickers
            .iter()
            .filter_map(|t| self.quotes.get(t).map(|q| (t.clone(), q.clone())))
            .collect())
    }

    async fn fetch_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<ExchangeRate, CoreError> {
        let from = normalize_currency(from_currency);
        let to = normalize_currency(to_currency);

        if let Some(rate) = self.rates.get(&(from.clone(), to.clone())) {
            return Ok(ExchangeRate::new(&from, &to, *rate));
        }
        match self
            .rates
            .get(&(to.clone(), from.clone()))
            .and_then(|inverse| Decimal::ONE.checked_div(*inverse))
        {
            Some(rate) => Ok(ExchangeRate::new(&from, &to, rate)),
            None => Err(CoreError::MissingRate { from, to }),
        }
    }
}
