use log::debug;

use crate::errors::CoreError;
use crate::models::holding::Holding;

/// Manages the holding set: add, update, remove.
///
/// Every edit validates first and only then touches the list, so a rejected
/// edit leaves the holdings exactly as they were.
pub struct HoldingService;

impl HoldingService {
    pub fn new() -> Self {
        Self
    }

    /// Add a new holding. Fails if the ticker is already present.
    pub fn add_holding(&self, holdings: &mut Vec<Holding>, holding: Holding) -> Result<(), CoreError> {
        holding.check().map_err(CoreError::ValidationError)?;
        if holdings.iter().any(|h| h.ticker == holding.ticker) {
            return Err(CoreError::DuplicateTicker(holding.ticker));
        }
        debug!("Adding holding {} ({})", holding.ticker, holding.category);
        holdings.push(holding);
        Ok(())
    }

    /// Replace the holding identified by `ticker` in place (position is kept).
    /// The replacement may carry a new ticker as long as it does not collide.
    pub fn update_holding(
        &self,
        holdings: &mut [Holding],
        ticker: &str,
        updated: Holding,
    ) -> Result<(), CoreError> {
        updated.check().map_err(CoreError::ValidationError)?;

        let idx = Self::position(holdings, ticker)?;

        if updated.ticker != ticker && holdings.iter().any(|h| h.ticker == updated.ticker) {
            return Err(CoreError::DuplicateTicker(updated.ticker));
        }

        holdings[idx] = updated;
        Ok(())
    }

    /// Remove a holding by ticker and hand it back.
    pub fn remove_holding(&self, holdings: &mut Vec<Holding>, ticker: &str) -> Result<Holding, CoreError> {
        let idx = Self::position(holdings, ticker)?;
        Ok(holdings.remove(idx))
    }

    /// Tickers in holding order (what the oracle must be asked for).
    pub fn tickers(&self, holdings: &[Holding]) -> Vec<String> {
        holdings.iter().map(|h| h.ticker.clone()).collect()
    }

    fn position(holdings: &[Holding], ticker: &str) -> Result<usize, CoreError> {
        holdings
            .iter()
            .position(|h| h.ticker == ticker)
            .ok_or_else(|| CoreError::HoldingNotFound(ticker.to_string()))
    }
}

impl Default for HoldingService {
    fn default() -> Self {
        Self::new()
    }
}
