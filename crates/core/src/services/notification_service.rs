use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;

use crate::models::notification::{NotificationEntry, Severity};

/// Maintains the notification log (newest-first) and raises market alerts.
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }

    /// Record a notification at the head of the log.
    pub fn append(&self, log: &mut Vec<NotificationEntry>, entry: NotificationEntry) {
        info!("[{}] {}", entry.severity, entry.message);
        log.insert(0, entry);
    }

    /// Build a Warning if an FX pair moved by at least `threshold_pct` percent
    /// between two observations. Returns `None` for a smaller move, an
    /// unusable (non-positive) previous rate, or a change outside the decimal range.
    pub fn check_fx_move(
        &self,
        from_currency: &str,
        to_currency: &str,
        previous_rate: Decimal,
        current_rate: Decimal,
        threshold_pct: Decimal,
        today: NaiveDate,
    ) -> Option<NotificationEntry> {
        if previous_rate <= Decimal::ZERO {
            return None;
        }
        let change_pct = current_rate
            .checked_sub(previous_rate)
            .and_then(|delta| delta.checked_div(previous_rate))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))?;
        if change_pct.abs() < threshold_pct {
            return None;
        }
        Some(NotificationEntry::new(
            today,
            Severity::Warning,
            format!(
                "{from_currency}/{to_currency} moved {}% ({} → {}). Check your asset values.",
                change_pct.round_dp(2),
                previous_rate,
                current_rate
            ),
        ))
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}
