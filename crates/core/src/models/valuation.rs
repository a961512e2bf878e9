use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// Why a holding was valued at zero in a computation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The oracle supplied no quote for this ticker.
    PriceUnavailable { ticker: String },
    /// A quote exists but there is no rate from its currency into the reporting currency.
    MissingRate {
        ticker: String,
        from: String,
        to: String,
    },
    /// Price × quantity (or the running total) exceeds the decimal range.
    Overflow { ticker: String },
}

impl Diagnostic {
    pub fn ticker(&self) -> &str {
        match self {
            Diagnostic::PriceUnavailable { ticker } => ticker,
            Diagnostic::MissingRate { ticker, .. } => ticker,
            Diagnostic::Overflow { ticker } => ticker,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::PriceUnavailable { ticker } => {
                write!(f, "No price for {ticker}; valued at 0")
            }
            Diagnostic::MissingRate { ticker, from, to } => {
                write!(f, "No {from}->{to} rate for {ticker}; valued at 0")
            }
            Diagnostic::Overflow { ticker } => {
                write!(f, "Value of {ticker} is out of range; valued at 0")
            }
        }
    }
}

/// A holding with its price and value in the reporting currency.
/// Derived every cycle, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedHolding {
    pub holding: Holding,

    /// Price of one unit in the reporting currency (0 when unavailable)
    pub unit_price: Decimal,

    /// `quantity × unit_price`
    pub market_value: Decimal,
}

/// Result of valuing the whole holding set for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub reporting_currency: String,

    /// Same order as the input holdings
    pub holdings: Vec<ValuedHolding>,

    /// Per-item degradations; empty when every holding was priced
    pub diagnostics: Vec<Diagnostic>,
}

/// Rebalancing direction implied by a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebalanceSignal {
    /// Underweight
    Buy,
    /// Overweight
    Sell,
    Hold,
}

/// Current vs target value for one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceLine {
    pub ticker: String,
    pub current_value: Decimal,
    pub target_value: Decimal,
    /// `current_value - target_value`
    pub deviation: Decimal,
}

impl RebalanceLine {
    pub fn signal(&self) -> RebalanceSignal {
        signal_for(self.deviation)
    }
}

/// Current vs target value for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDeviation {
    pub category: String,
    pub current_value: Decimal,
    pub target_value: Decimal,
    pub deviation: Decimal,
}

impl CategoryDeviation {
    pub fn signal(&self) -> RebalanceSignal {
        signal_for(self.deviation)
    }
}

fn signal_for(deviation: Decimal) -> RebalanceSignal {
    if deviation > Decimal::ZERO {
        RebalanceSignal::Sell
    } else if deviation < Decimal::ZERO {
        RebalanceSignal::Buy
    } else {
        RebalanceSignal::Hold
    }
}

/// One slice of the overall allocation (a category, or cash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub label: String,
    pub value: Decimal,
}

/// Headline figures for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub reporting_currency: String,

    /// Investable value: sum of holding market values, cash excluded
    pub total_investments: Decimal,

    pub cash_balance: Decimal,

    /// `total_investments + cash_balance`
    pub total_assets: Decimal,

    /// Cash share of total assets in `[0, 1]` terms; `None` when total assets are zero
    pub cash_ratio: Option<Decimal>,

    /// Category slices (sorted by category) followed by a trailing cash slice
    pub allocation: Vec<AllocationSlice>,
}
