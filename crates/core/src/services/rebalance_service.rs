use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::holding::Holding;
use crate::models::valuation::{CategoryDeviation, RebalanceLine, ValuedHolding};
use crate::services::valuation_service::ValuationService;

/// Compares current allocation to target allocation.
///
/// Targets are `total_investable_value × target_ratio`, where the investable
/// total excludes cash. Ratios are used as given: a set summing to less or
/// more than 1 is reported as-is, never clamped or rescaled.
pub struct RebalanceService {
    valuation_service: ValuationService,
}

impl RebalanceService {
    pub fn new() -> Self {
        Self {
            valuation_service: ValuationService::new(),
        }
    }

    /// Per-holding deviation. Positive = overweight (sell), negative = underweight (buy).
    pub fn analyze(
        &self,
        valued: &[ValuedHolding],
        total_investable_value: Decimal,
    ) -> Vec<RebalanceLine> {
        valued
            .iter()
            .map(|v| {
                let target_value = total_investable_value.saturating_mul(v.holding.target_ratio);
                RebalanceLine {
                    ticker: v.holding.ticker.clone(),
                    current_value: v.market_value,
                    target_value,
                    deviation: v.market_value.saturating_sub(target_value),
                }
            })
            .collect()
    }

    /// Category-level deviation: the grouped market values run through the same
    /// formula, with a category's ratio being the sum of its holdings' ratios.
    pub fn analyze_categories(
        &self,
        valued: &[ValuedHolding],
        total_investable_value: Decimal,
    ) -> Vec<CategoryDeviation> {
        let current = self.valuation_service.group_by_category(valued);

        let mut ratios: BTreeMap<&str, Decimal> = BTreeMap::new();
        for v in valued {
            let slot = ratios.entry(v.holding.category.as_str()).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(v.holding.target_ratio);
        }

        current
            .into_iter()
            .map(|(category, current_value)| {
                let ratio = ratios
                    .get(category.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let target_value = total_investable_value.saturating_mul(ratio);
                CategoryDeviation {
                    category,
                    current_value,
                    target_value,
                    deviation: current_value.saturating_sub(target_value),
                }
            })
            .collect()
    }

    /// Σ target_ratio. Callers may warn when this is not 1; analysis is unaffected.
    pub fn target_ratio_sum(&self, holdings: &[Holding]) -> Decimal {
        holdings
            .iter()
            .fold(Decimal::ZERO, |acc, h| acc.saturating_add(h.target_ratio))
    }
}

impl Default for RebalanceService {
    fn default() -> Self {
        Self::new()
    }
}
