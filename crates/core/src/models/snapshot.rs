use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::holding::Holding;
use super::notification::NotificationEntry;
use super::transaction::Transaction;

/// The main data container: the complete mutable state of a dashboard session.
/// This is the unit of export and import.
///
/// Contains: cash balance, the notification log (newest-first), holdings,
/// and the cash-flow ledger (insertion-ordered).
///
/// The cash balance and the ledger are independent. Completed transactions
/// are never applied to `cash_balance` automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cash_balance: Decimal,
    pub notifications: Vec<NotificationEntry>,
    pub holdings: Vec<Holding>,
    pub transactions: Vec<Transaction>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            cash_balance: Decimal::ZERO,
            notifications: Vec::new(),
            holdings: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Check every invariant a freshly imported snapshot must satisfy.
    /// Returns the first violation as a human-readable message.
    pub fn validate(&self) -> Result<(), String> {
        let mut tickers = HashSet::new();
        for (idx, holding) in self.holdings.iter().enumerate() {
            holding
                .check()
                .map_err(|reason| format!("holdings[{idx}]: {reason}"))?;
            if !tickers.insert(holding.ticker.as_str()) {
                return Err(format!(
                    "holdings[{idx}]: duplicate ticker {}",
                    holding.ticker
                ));
            }
        }

        for (idx, tx) in self.transactions.iter().enumerate() {
            if tx.amount <= Decimal::ZERO {
                return Err(format!(
                    "transactions[{idx}]: amount must be positive (got {})",
                    tx.amount
                ));
            }
        }

        Ok(())
    }
}
