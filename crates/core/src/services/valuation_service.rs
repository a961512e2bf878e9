use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::quote::{FxTable, Quote};
use crate::models::valuation::{Diagnostic, PortfolioValuation, ValuedHolding};
use crate::services::currency_service::CurrencyService;

/// Combines holdings with the cycle's quotes into market values.
///
/// Degradation is per holding: a missing quote or rate values that holding at
/// zero and records a `Diagnostic`, while every other holding is still valued
/// and aggregates stay computable.
pub struct ValuationService {
    currency_service: CurrencyService,
}

impl ValuationService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Value every holding. Output order matches `holdings`.
    pub fn value(
        &self,
        holdings: &[Holding],
        quotes: &HashMap<String, Quote>,
        fx: &FxTable,
        reporting_currency: &str,
    ) -> PortfolioValuation {
        let mut valued = Vec::with_capacity(holdings.len());
        let mut diagnostics = Vec::new();
        let mut running_total = Decimal::ZERO;

        for holding in holdings {
            let unit_price = match quotes.get(&holding.ticker) {
                None => {
                    debug!("No quote for {}; valued at zero", holding.ticker);
                    diagnostics.push(Diagnostic::PriceUnavailable {
                        ticker: holding.ticker.clone(),
                    });
                    Decimal::ZERO
                }
                Some(quote) => match self.currency_service.normalize(quote, fx, reporting_currency) {
                    Ok(price) => price,
                    Err(CoreError::MissingRate { from, to }) => {
                        warn!(
                            "Missing FX rate {}->{} for {}; valued at zero",
                            from, to, holding.ticker
                        );
                        diagnostics.push(Diagnostic::MissingRate {
                            ticker: holding.ticker.clone(),
                            from,
                            to,
                        });
                        Decimal::ZERO
                    }
                    Err(CoreError::Overflow(reason)) => {
                        warn!("{}: {reason}; valued at zero", holding.ticker);
                        diagnostics.push(Diagnostic::Overflow {
                            ticker: holding.ticker.clone(),
                        });
                        Decimal::ZERO
                    }
                    Err(e) => {
                        warn!("Could not normalize quote for {}: {e}", holding.ticker);
                        diagnostics.push(Diagnostic::PriceUnavailable {
                            ticker: holding.ticker.clone(),
                        });
                        Decimal::ZERO
                    }
                },
            };

            // Negative oracle prices are treated as unusable.
            let unit_price = unit_price.max(Decimal::ZERO);

            // The running total must stay representable so every aggregate
            // over the result (total, category groups) is overflow-free.
            let market_value = match holding
                .quantity
                .checked_mul(unit_price)
                .filter(|value| running_total.checked_add(*value).is_some())
            {
                Some(value) => value,
                None => {
                    warn!("Market value of {} is out of range; valued at zero", holding.ticker);
                    diagnostics.push(Diagnostic::Overflow {
                        ticker: holding.ticker.clone(),
                    });
                    Decimal::ZERO
                }
            };
            running_total += market_value;

            valued.push(ValuedHolding {
                holding: holding.clone(),
                unit_price,
                market_value,
            });
        }

        PortfolioValuation {
            reporting_currency: reporting_currency.to_string(),
            holdings: valued,
            diagnostics,
        }
    }

    /// Investable value: Σ market_value. Saturates instead of panicking for
    /// hand-built inputs; output of `value` never reaches the limit.
    pub fn total_value(&self, valued: &[ValuedHolding]) -> Decimal {
        valued
            .iter()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v.market_value))
    }

    /// Σ market_value per category. Categories come from the input; a holding
    /// valued at zero still contributes its category.
    pub fn group_by_category(&self, valued: &[ValuedHolding]) -> BTreeMap<String, Decimal> {
        let mut groups: BTreeMap<String, Decimal> = BTreeMap::new();
        for v in valued {
            let slot = groups
                .entry(v.holding.category.clone())
                .or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(v.market_value);
        }
        groups
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
