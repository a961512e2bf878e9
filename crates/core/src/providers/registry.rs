use async_trait::async_trait;
use log::warn;
use std::collections::{BTreeSet, HashMap};

use crate::errors::CoreError;
use crate::models::quote::{ExchangeRate, Quote};
#[cfg(not(target_arch = "wasm32"))]
use super::yahoo_finance::YahooFinanceOracle;
use super::traits::PriceOracle;

/// Ordered chain of price oracles, itself usable as a `PriceOracle`.
///
/// Oracles are asked in registration order. Tickers the first oracle could
/// not price are passed on to the next one; rates come from the first oracle
/// that answers.
pub struct OracleRegistry {
    oracles: Vec<Box<dyn PriceOracle>>,
}

impl OracleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            oracles: Vec::new(),
        }
    }

    /// Create a registry with the default live oracles.
    ///
    /// Yahoo Finance is registered on native targets only; on WASM the
    /// registry starts empty and the host registers its own oracle.
    pub fn new_with_defaults(currency_hints: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            match YahooFinanceOracle::new(currency_hints.clone()) {
                Ok(yahoo) => registry.register(Box::new(yahoo)),
                Err(e) => warn!("Yahoo Finance oracle unavailable: {e}"),
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = currency_hints;

        registry
    }

    /// Register an oracle at the end of the fallback chain.
    pub fn register(&mut self, oracle: Box<dyn PriceOracle>) {
        self.oracles.push(oracle);
    }

    pub fn len(&self) -> usize {
        self.oracles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oracles.is_empty()
    }

    /// Names of registered oracles, in fallback order.
    pub fn names(&self) -> Vec<String> {
        self.oracles.iter().map(|o| o.name().to_string()).collect()
    }

    fn empty_error() -> CoreError {
        CoreError::Oracle {
            oracle: "registry".into(),
            message: "no price oracle registered".into(),
        }
    }
}

impl Default for OracleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceOracle for OracleRegistry {
    fn name(&self) -> &str {
        "registry"
    }

    async fn fetch_quotes(
        &self,
        tickers: &BTreeSet<String>,
    ) -> Result<HashMap<String, Quote>, CoreError> {
        if self.oracles.is_empty() {
            return Err(Self::empty_error());
        }

        let mut found: HashMap<String, Quote> = HashMap::new();
        let mut remaining = tickers.clone();
        let mut last_error = None;
        let mut any_succeeded = false;

        for oracle in &self.oracles {
            if remaining.is_empty() {
                break;
            }
            match oracle.fetch_quotes(&remaining).await {
                Ok(quotes) => {
                    any_succeeded = true;
                    for (ticker, quote) in quotes {
                        remaining.remove(&ticker);
                        found.insert(ticker, quote);
                    }
                }
                Err(e) => {
                    warn!("Oracle {} failed to fetch quotes: {e}", oracle.name());
                    last_error = Some(e);
                }
            }
        }

        match (any_succeeded, last_error) {
            (false, Some(e)) => Err(e),
            _ => Ok(found),
        }
    }

    async fn fetch_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<ExchangeRate, CoreError> {
        let mut last_error = None;
        for oracle in &self.oracles {
            match oracle.fetch_rate(from_currency, to_currency).await {
                Ok(rate) => return Ok(rate),
                Err(e) => {
                    warn!(
                        "Oracle {} failed to fetch {from_currency}->{to_currency}: {e}",
                        oracle.name()
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(Self::empty_error))
    }
}
