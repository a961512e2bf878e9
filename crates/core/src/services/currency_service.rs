use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::quote::{normalize_currency, FxTable, Quote};

/// Converts raw quotes into the reporting currency.
///
/// The quote's `native_currency` decides which rate applies:
/// - native == reporting → price returned unchanged
/// - otherwise → `price × rate(native → reporting)`, direct or inverse pair
///
/// Pure and synchronous. A missing pair is reported as `CoreError::MissingRate`
/// and a result too large for `Decimal` as `CoreError::Overflow`; the caller
/// decides the fallback.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Price of one unit of `quote` expressed in `reporting_currency`.
    pub fn normalize(
        &self,
        quote: &Quote,
        fx: &FxTable,
        reporting_currency: &str,
    ) -> Result<Decimal, CoreError> {
        self.convert(quote.native_price, &quote.native_currency, reporting_currency, fx)
    }

    /// Convert an amount between two currencies using the cycle's FX table.
    pub fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        fx: &FxTable,
    ) -> Result<Decimal, CoreError> {
        let from = normalize_currency(from_currency);
        let to = normalize_currency(to_currency);

        if from == to {
            return Ok(amount);
        }

        let rate = fx
            .rate(&from, &to)
            .ok_or_else(|| CoreError::MissingRate { from: from.clone(), to: to.clone() })?;

        amount.checked_mul(rate).ok_or_else(|| {
            CoreError::Overflow(format!("{amount} {from} × {rate} does not fit in a decimal"))
        })
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
