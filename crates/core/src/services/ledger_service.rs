use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::transaction::{
    CashFlowSummary, SalaryEstimate, Transaction, TransactionKind, TransactionStatus,
};

/// Ledger split at a reference date. Both sides borrow from the same list.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerPartition<'a> {
    /// `date >= today`, oldest first
    pub future: Vec<&'a Transaction>,
    /// `date < today`, newest first
    pub past: Vec<&'a Transaction>,
}

/// Cash-flow ledger operations: append, status transitions, time-partitioned
/// aggregation and payment capacity.
///
/// Pure business logic — no I/O, no clock. `today` always comes from the caller.
/// Sums saturate at the `Decimal` limits rather than panicking.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Append a transaction after validating it. The list is not resorted;
    /// display ordering is done by `partition`.
    pub fn append(
        &self,
        ledger: &mut Vec<Transaction>,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        self.validate(&transaction)?;
        debug!(
            "Appending {} {} on {} ({})",
            transaction.kind, transaction.amount, transaction.date, transaction.category
        );
        ledger.push(transaction);
        Ok(())
    }

    /// Planned → Completed for the entry at `index` (insertion order).
    /// Marking an already completed entry is a no-op.
    pub fn mark_completed(
        &self,
        ledger: &mut [Transaction],
        index: usize,
    ) -> Result<(), CoreError> {
        let tx = ledger
            .get_mut(index)
            .ok_or(CoreError::TransactionNotFound(index))?;
        tx.status = TransactionStatus::Completed;
        Ok(())
    }

    /// Income dated within `year`, planned entries included.
    pub fn annual_income(&self, ledger: &[Transaction], year: i32) -> Decimal {
        ledger
            .iter()
            .filter(|t| t.kind == TransactionKind::Income && t.date.year() == year)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    /// Expenses dated `today` or later, any status.
    pub fn future_expenses(&self, ledger: &[Transaction], today: NaiveDate) -> Decimal {
        ledger
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.date >= today)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    /// Expenses dated strictly before `today`.
    pub fn past_expenses(&self, ledger: &[Transaction], today: NaiveDate) -> Decimal {
        ledger
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.date < today)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    pub fn total_expenses(&self, ledger: &[Transaction]) -> Decimal {
        ledger
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    /// Cash left after every committed future expense. Negative is a valid result.
    pub fn payment_capacity(
        &self,
        ledger: &[Transaction],
        cash_balance: Decimal,
        today: NaiveDate,
    ) -> Decimal {
        cash_balance.saturating_sub(self.future_expenses(ledger, today))
    }

    /// Split into future (`date >= today`, ascending) and past (`date < today`,
    /// descending). Sorting is stable, so same-day entries keep insertion order.
    pub fn partition<'a>(&self, ledger: &'a [Transaction], today: NaiveDate) -> LedgerPartition<'a> {
        let (mut future, mut past): (Vec<&Transaction>, Vec<&Transaction>) =
            ledger.iter().partition(|t| t.date >= today);
        future.sort_by_key(|t| t.date);
        past.sort_by(|a, b| b.date.cmp(&a.date));
        LedgerPartition { future, past }
    }

    /// Headline figures for `today`'s calendar year.
    pub fn summary(
        &self,
        ledger: &[Transaction],
        cash_balance: Decimal,
        today: NaiveDate,
    ) -> CashFlowSummary {
        let future_expenses = self.future_expenses(ledger, today);
        CashFlowSummary {
            year: today.year(),
            annual_income: self.annual_income(ledger, today.year()),
            future_expenses,
            cash_balance,
            payment_capacity: cash_balance.saturating_sub(future_expenses),
        }
    }

    /// Turn a salary estimate into a planned income entry.
    pub fn salary_transaction(&self, estimate: &SalaryEstimate) -> Result<Transaction, CoreError> {
        let total = estimate.total();
        if total <= Decimal::ZERO {
            return Err(CoreError::InvalidTransaction(format!(
                "Estimated salary must be positive (got {total})"
            )));
        }
        Ok(Transaction::new(
            estimate.pay_date,
            TransactionKind::Income,
            estimate.employer.clone(),
            total,
            TransactionStatus::Planned,
        ))
    }

    /// Amount must be strictly positive. `kind` is a closed enum, so documents
    /// with an unknown kind are already rejected while parsing.
    fn validate(&self, transaction: &Transaction) -> Result<(), CoreError> {
        if transaction.amount <= Decimal::ZERO {
            return Err(CoreError::InvalidTransaction(format!(
                "amount must be positive (got {})",
                transaction.amount
            )));
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
