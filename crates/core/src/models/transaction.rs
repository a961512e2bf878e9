use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

/// Whether an entry is scheduled or already settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Planned,
    Completed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Planned => write!(f, "Planned"),
            TransactionStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A dated income or expense entry in the cash-flow ledger.
///
/// Entries are never edited after they are appended, apart from the
/// Planned → Completed status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date (no time component)
    pub date: NaiveDate,

    pub kind: TransactionKind,

    /// Counterparty or budget line (e.g., "Employer A", "Credit card")
    pub category: String,

    /// Always strictly positive; the sign comes from `kind`.
    pub amount: Decimal,

    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            status,
        }
    }

    pub fn income(date: NaiveDate, category: impl Into<String>, amount: Decimal) -> Self {
        Self::new(date, TransactionKind::Income, category, amount, TransactionStatus::Planned)
    }

    pub fn expense(date: NaiveDate, category: impl Into<String>, amount: Decimal) -> Self {
        Self::new(date, TransactionKind::Expense, category, amount, TransactionStatus::Planned)
    }

    /// Same entry with the status set to Completed.
    pub fn completed(mut self) -> Self {
        self.status = TransactionStatus::Completed;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Headline cash-flow figures for the budget view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    /// Calendar year `annual_income` was computed for
    pub year: i32,

    /// Income dated in `year`, planned and completed alike
    pub annual_income: Decimal,

    /// Expenses dated today or later, regardless of status
    pub future_expenses: Decimal,

    pub cash_balance: Decimal,

    /// `cash_balance - future_expenses`; negative means committed spending exceeds cash
    pub payment_capacity: Decimal,
}

/// One block of hours at a single hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub hourly_rate: Decimal,
    pub hours: Decimal,
}

/// Expected pay for part-time work, turned into a planned income entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryEstimate {
    pub pay_date: NaiveDate,
    /// Becomes the transaction category
    pub employer: String,
    pub shifts: Vec<Shift>,
    pub allowance: Decimal,
}

impl SalaryEstimate {
    /// Σ rate × hours plus allowance, truncated to whole currency units.
    pub fn total(&self) -> Decimal {
        self.shifts
            .iter()
            .fold(self.allowance, |acc, s| {
                acc.saturating_add(s.hourly_rate.saturating_mul(s.hours))
            })
            .trunc()
    }
}
