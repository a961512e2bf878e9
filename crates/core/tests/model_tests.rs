use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use asset_dashboard_core::models::holding::Holding;
use asset_dashboard_core::models::notification::{NotificationEntry, Severity};
use asset_dashboard_core::models::quote::{
    is_valid_currency, normalize_currency, ExchangeRate, FxTable, MarketData, Quote,
};
use asset_dashboard_core::models::settings::Settings;
use asset_dashboard_core::models::snapshot::Snapshot;
use asset_dashboard_core::models::transaction::{
    SalaryEstimate, Shift, Transaction, TransactionKind, TransactionStatus,
};
use asset_dashboard_core::models::valuation::{Diagnostic, RebalanceLine, RebalanceSignal};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn new_trims_ticker() {
        let h = Holding::new("  VTI ", "Vanguard Total Stock", "US ETF", dec!(30), dec!(0.25));
        assert_eq!(h.ticker, "VTI");
    }

    #[test]
    fn check_accepts_zero_quantity_and_bounds() {
        assert!(Holding::new("A", "a", "c", Decimal::ZERO, Decimal::ZERO).check().is_ok());
        assert!(Holding::new("A", "a", "c", dec!(1), Decimal::ONE).check().is_ok());
    }

    #[test]
    fn check_rejects_negative_quantity() {
        let err = Holding::new("A", "a", "c", dec!(-1), dec!(0.1)).check().unwrap_err();
        assert!(err.contains("quantity"));
    }

    #[test]
    fn check_rejects_ratio_out_of_range() {
        assert!(Holding::new("A", "a", "c", dec!(1), dec!(1.01)).check().is_err());
        assert!(Holding::new("A", "a", "c", dec!(1), dec!(-0.01)).check().is_err());
    }

    #[test]
    fn check_rejects_blank_ticker() {
        assert!(Holding::new("   ", "a", "c", dec!(1), dec!(0.1)).check().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Quotes & FX
// ═══════════════════════════════════════════════════════════════════

mod quotes {
    use super::*;

    #[test]
    fn currency_codes_are_uppercased() {
        assert_eq!(normalize_currency(" usd "), "USD");
        let q = Quote::new("VTI", dec!(250), "usd");
        assert_eq!(q.native_currency, "USD");
    }

    #[test]
    fn currency_validation() {
        assert!(is_valid_currency("JPY"));
        assert!(is_valid_currency("eur"));
        assert!(!is_valid_currency("US"));
        assert!(!is_valid_currency("US1"));
        assert!(!is_valid_currency("DOLLAR"));
    }

    #[test]
    fn fx_direct_lookup() {
        let fx = FxTable::from_rates([ExchangeRate::new("USD", "JPY", dec!(150))]);
        assert_eq!(fx.rate("USD", "JPY"), Some(dec!(150)));
    }

    #[test]
    fn fx_inverse_lookup() {
        let fx = FxTable::from_rates([ExchangeRate::new("USD", "JPY", dec!(150))]);
        let inverse = fx.rate("JPY", "USD").unwrap();
        assert_eq!(inverse, Decimal::ONE / dec!(150));
    }

    #[test]
    fn fx_same_currency_is_one() {
        let fx = FxTable::new();
        assert_eq!(fx.rate("JPY", "jpy"), Some(Decimal::ONE));
    }

    #[test]
    fn fx_unknown_pair_is_none() {
        let fx = FxTable::from_rates([ExchangeRate::new("USD", "JPY", dec!(150))]);
        assert_eq!(fx.rate("EUR", "JPY"), None);
    }

    #[test]
    fn fx_skips_non_positive_rates() {
        let fx = FxTable::from_rates([
            ExchangeRate::new("USD", "JPY", Decimal::ZERO),
            ExchangeRate::new("EUR", "JPY", dec!(-1)),
        ]);
        assert!(fx.is_empty());
        assert_eq!(fx.rate("USD", "JPY"), None);
    }

    #[test]
    fn market_data_indexes_quotes_by_ticker() {
        let data = MarketData::new(
            [Quote::new("VTI", dec!(250), "USD"), Quote::new("7203.T", dec!(2800), "JPY")],
            [ExchangeRate::new("USD", "JPY", dec!(150))],
        );
        assert_eq!(data.quotes.len(), 2);
        assert_eq!(data.quotes["7203.T"].native_currency, "JPY");
        assert_eq!(data.fx.len(), 1);
        assert!(data.failures.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transactions
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn income_and_expense_helpers_are_planned() {
        let inc = Transaction::income(d(2025, 11, 27), "Employer A", dec!(73985));
        let exp = Transaction::expense(d(2025, 11, 27), "Card", dec!(45584));
        assert!(inc.is_income());
        assert!(exp.is_expense());
        assert_eq!(inc.status, TransactionStatus::Planned);
        assert_eq!(exp.status, TransactionStatus::Planned);
    }

    #[test]
    fn completed_sets_status() {
        let tx = Transaction::income(d(2025, 11, 27), "Employer A", dec!(1)).completed();
        assert_eq!(tx.status, TransactionStatus::Completed);
    }

    #[test]
    fn display_kind_and_status() {
        assert_eq!(TransactionKind::Income.to_string(), "Income");
        assert_eq!(TransactionKind::Expense.to_string(), "Expense");
        assert_eq!(TransactionStatus::Planned.to_string(), "Planned");
        assert_eq!(TransactionStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn serde_uses_iso_dates_and_variant_names() {
        let tx = Transaction::expense(d(2026, 1, 27), "Card", dec!(110011));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2026-01-27");
        assert_eq!(json["kind"], "Expense");
        assert_eq!(json["status"], "Planned");
    }

    #[test]
    fn salary_total_truncates() {
        let estimate = SalaryEstimate {
            pay_date: d(2025, 12, 25),
            employer: "Employer A".into(),
            shifts: vec![
                Shift { hourly_rate: dec!(1141), hours: dec!(68.0) },
                Shift { hourly_rate: dec!(100), hours: dec!(18.0) },
            ],
            allowance: Decimal::ZERO,
        };
        assert_eq!(estimate.total(), dec!(79388));
    }

    #[test]
    fn salary_total_drops_fraction() {
        let estimate = SalaryEstimate {
            pay_date: d(2025, 12, 25),
            employer: "Employer B".into(),
            shifts: vec![Shift { hourly_rate: dec!(1141), hours: dec!(0.5) }],
            allowance: dec!(1000),
        };
        // 570.5 + 1000 → 1570
        assert_eq!(estimate.total(), dec!(1570));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Notifications
// ═══════════════════════════════════════════════════════════════════

mod notification {
    use super::*;

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Info.to_string(), "Info");
        assert_eq!(Severity::Warning.to_string(), "Warning");
        assert_eq!(Severity::Alert.to_string(), "Alert");
    }

    #[test]
    fn severity_serializes_as_type() {
        let entry = NotificationEntry::new(d(2025, 11, 28), Severity::Alert, "Drift over threshold");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Alert");
        assert_eq!(json["date"], "2025-11-28");
        assert!(json.get("severity").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Valuation models
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    fn line(deviation: Decimal) -> RebalanceLine {
        RebalanceLine {
            ticker: "VTI".into(),
            current_value: Decimal::ZERO,
            target_value: Decimal::ZERO,
            deviation,
        }
    }

    #[test]
    fn signal_follows_deviation_sign() {
        assert_eq!(line(dec!(-50000)).signal(), RebalanceSignal::Buy);
        assert_eq!(line(dec!(10)).signal(), RebalanceSignal::Sell);
        assert_eq!(line(Decimal::ZERO).signal(), RebalanceSignal::Hold);
    }

    #[test]
    fn diagnostic_ticker_and_display() {
        let missing = Diagnostic::PriceUnavailable { ticker: "GLD".into() };
        let no_rate = Diagnostic::MissingRate {
            ticker: "VTI".into(),
            from: "USD".into(),
            to: "JPY".into(),
        };
        assert_eq!(missing.ticker(), "GLD");
        assert_eq!(no_rate.ticker(), "VTI");
        assert!(no_rate.to_string().contains("USD->JPY"));
        let overflow = Diagnostic::Overflow { ticker: "HUGE".into() };
        assert_eq!(overflow.ticker(), "HUGE");
        assert!(overflow.to_string().contains("out of range"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.reporting_currency, "JPY");
        assert_eq!(s.fx_move_threshold_pct, dec!(2));
        assert_eq!(s.currency_hints.get(".T").map(String::as_str), Some("JPY"));
    }

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn partial_json_normalizes_currency() {
        let s = Settings::from_json(r#"{ "reporting_currency": "usd" }"#).unwrap();
        assert_eq!(s.reporting_currency, "USD");
        assert_eq!(s.fx_move_threshold_pct, dec!(2));
    }

    #[test]
    fn rejects_bad_currency() {
        assert!(Settings::from_json(r#"{ "reporting_currency": "YEN!" }"#).is_err());
    }

    #[test]
    fn rejects_negative_threshold() {
        assert!(Settings::from_json(r#"{ "fx_move_threshold_pct": -1 }"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Settings::from_json("not json").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Snapshot
// ═══════════════════════════════════════════════════════════════════

mod snapshot {
    use super::*;

    #[test]
    fn default_is_empty() {
        let s = Snapshot::default();
        assert!(s.cash_balance.is_zero());
        assert!(s.holdings.is_empty());
        assert!(s.transactions.is_empty());
        assert!(s.notifications.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_tickers() {
        let mut s = Snapshot::default();
        s.holdings.push(Holding::new("VTI", "a", "c", dec!(1), dec!(0.1)));
        s.holdings.push(Holding::new("VTI", "b", "c", dec!(2), dec!(0.1)));
        let err = s.validate().unwrap_err();
        assert!(err.contains("duplicate ticker VTI"));
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        let mut s = Snapshot::default();
        s.transactions
            .push(Transaction::expense(d(2025, 1, 1), "Card", Decimal::ZERO));
        let err = s.validate().unwrap_err();
        assert!(err.starts_with("transactions[0]"));
    }

    #[test]
    fn validate_reports_holding_index() {
        let mut s = Snapshot::default();
        s.holdings.push(Holding::new("VTI", "a", "c", dec!(1), dec!(0.1)));
        s.holdings.push(Holding::new("QQQ", "b", "c", dec!(1), dec!(2)));
        let err = s.validate().unwrap_err();
        assert!(err.starts_with("holdings[1]"));
    }
}
