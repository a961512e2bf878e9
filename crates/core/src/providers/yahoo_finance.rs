use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::errors::CoreError;
use crate::models::quote::{normalize_currency, ExchangeRate, Quote};
use super::traits::PriceOracle;

const ORACLE_NAME: &str = "Yahoo Finance";
const DEFAULT_CURRENCY: &str = "USD";

/// Yahoo Finance oracle for equities, ETFs, commodity funds, crypto and FX.
///
/// - **Free**: No API key required.
/// - **Quotes**: latest daily close.
/// - **FX**: pair tickers of the form `USDJPY=X`.
///
/// Yahoo reports prices in the listing's currency. The adapter resolves that
/// currency once, from its hints: an exact ticker entry wins, then the
/// longest matching suffix (".T", "-USD"), then USD.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio).
pub struct YahooFinanceOracle {
    connector: yahoo_finance_api::YahooConnector,
    currency_hints: HashMap<String, String>,
}

impl YahooFinanceOracle {
    pub fn new(currency_hints: HashMap<String, String>) -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Oracle {
            oracle: ORACLE_NAME.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        let currency_hints = currency_hints
            .into_iter()
            .map(|(k, v)| (k, normalize_currency(&v)))
            .collect();
        Ok(Self {
            connector,
            currency_hints,
        })
    }

    /// Native currency for a ticker.
    pub fn native_currency(&self, ticker: &str) -> String {
        Self::resolve_currency(&self.currency_hints, ticker)
    }

    fn resolve_currency(hints: &HashMap<String, String>, ticker: &str) -> String {
        if let Some(code) = hints.get(ticker) {
            return code.clone();
        }
        hints
            .iter()
            .filter(|(key, _)| key.starts_with(['.', '-']) && ticker.ends_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, code)| code.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    /// Yahoo ticker for an FX pair, e.g. USD → JPY is `USDJPY=X`.
    fn fx_ticker(from: &str, to: &str) -> String {
        format!("{from}{to}=X")
    }

    async fn latest_close(&self, symbol: &str) -> Result<Decimal, CoreError> {
        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| CoreError::Oracle {
                oracle: ORACLE_NAME.into(),
                message: format!("Failed to fetch latest quote for {symbol}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::Oracle {
            oracle: ORACLE_NAME.into(),
            message: format!("No quote data for {symbol}: {e}"),
        })?;

        Decimal::from_f64(quote.close).ok_or_else(|| CoreError::PriceUnavailable {
            ticker: symbol.to_string(),
        })
    }
}

#[async_trait]
impl PriceOracle for YahooFinanceOracle {
    fn name(&self) -> &str {
        ORACLE_NAME
    }

    async fn fetch_quotes(
        &self,
        tickers: &BTreeSet<String>,
    ) -> Result<HashMap<String, Quote>, CoreError> {
        let mut quotes = HashMap::new();
        for ticker in tickers {
            match self.latest_close(ticker).await {
                Ok(price) => {
                    let currency = self.native_currency(ticker);
                    debug!("{ticker}: {price} {currency}");
                    quotes.insert(ticker.clone(), Quote::new(ticker.clone(), price, &currency));
                }
                Err(e) => warn!("Skipping {ticker}: {e}"),
            }
        }
        Ok(quotes)
    }

    async fn fetch_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<ExchangeRate, CoreError> {
        let from = normalize_currency(from_currency);
        let to = normalize_currency(to_currency);
        let rate = self
            .latest_close(&Self::fx_ticker(&from, &to))
            .await
            .map_err(|_| CoreError::MissingRate {
                from: from.clone(),
                to: to.clone(),
            })?;
        Ok(ExchangeRate::new(&from, &to, rate))
    }
}
