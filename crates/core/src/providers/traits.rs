use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

use crate::errors::CoreError;
use crate::models::quote::{ExchangeRate, Quote};

/// Source of market quotes and FX rates for a computation cycle.
///
/// Implementations own all network concerns (timeouts, retries, auth). They
/// must also resolve each quote's `native_currency`; the engine never infers
/// it from the ticker.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceOracle: Send + Sync {
    /// Human-readable name of this oracle (for logs/errors).
    fn name(&self) -> &str;

    /// Latest quotes for the requested tickers.
    ///
    /// May return a partial map: tickers the oracle could not price are
    /// simply absent. An `Err` means the whole request failed.
    async fn fetch_quotes(
        &self,
        tickers: &BTreeSet<String>,
    ) -> Result<HashMap<String, Quote>, CoreError>;

    /// Latest rate converting `from_currency` into `to_currency`.
    async fn fetch_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<ExchangeRate, CoreError>;
}
