use log::{info, warn};
use std::collections::BTreeSet;

use crate::models::holding::Holding;
use crate::models::quote::{normalize_currency, FxTable, MarketData};
use crate::providers::traits::PriceOracle;

/// Gathers one cycle's quotes and FX rates from a `PriceOracle`.
///
/// Failure strategy:
/// - **Whole quote request fails**: no quotes, one failure recorded.
/// - **Ticker missing from the answer**: left out; the valuator reports it.
/// - **Rate request fails**: left out; holdings in that currency value at zero.
///
/// Nothing here aborts. The result is always usable by the valuation engine,
/// and nothing is cached between cycles.
pub struct MarketDataService;

impl MarketDataService {
    pub fn new() -> Self {
        Self
    }

    pub async fn collect(
        &self,
        oracle: &dyn PriceOracle,
        holdings: &[Holding],
        reporting_currency: &str,
    ) -> MarketData {
        let reporting = normalize_currency(reporting_currency);
        let tickers: BTreeSet<String> = holdings.iter().map(|h| h.ticker.clone()).collect();
        let mut data = MarketData::default();

        if tickers.is_empty() {
            return data;
        }

        match oracle.fetch_quotes(&tickers).await {
            Ok(quotes) => data.quotes = quotes,
            Err(e) => {
                warn!("Quote fetch from {} failed: {e}", oracle.name());
                data.failures.push(format!("quotes: {e}"));
            }
        }

        for ticker in tickers.iter().filter(|t| !data.quotes.contains_key(*t)) {
            data.failures.push(format!("{ticker}: no quote returned"));
        }

        let currencies: BTreeSet<String> = data
            .quotes
            .values()
            .map(|q| normalize_currency(&q.native_currency))
            .filter(|c| *c != reporting)
            .collect();

        let mut fx = FxTable::new();
        for currency in &currencies {
            match oracle.fetch_rate(currency, &reporting).await {
                Ok(rate) => fx.insert(rate),
                Err(e) => {
                    warn!("Rate {currency}->{reporting} from {} failed: {e}", oracle.name());
                    data.failures.push(format!("{currency}->{reporting}: {e}"));
                }
            }
        }
        data.fx = fx;

        info!(
            "Collected {} quotes and {} rates ({} failures)",
            data.quotes.len(),
            data.fx.len(),
            data.failures.len()
        );
        data
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}
