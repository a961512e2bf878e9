// ═══════════════════════════════════════════════════════════════════
// Provider Tests — Static oracle, registry wiring, Yahoo currency hints
// ═══════════════════════════════════════════════════════════════════

use rust_decimal_macros::dec;
use std::collections::{BTreeSet, HashMap};

use asset_dashboard_core::errors::CoreError;
use asset_dashboard_core::models::quote::{ExchangeRate, Quote};
use asset_dashboard_core::models::settings::Settings;
use asset_dashboard_core::providers::registry::OracleRegistry;
use asset_dashboard_core::providers::static_oracle::StaticPriceOracle;
use asset_dashboard_core::providers::traits::PriceOracle;
use asset_dashboard_core::providers::yahoo_finance::YahooFinanceOracle;

fn tickers(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════
// StaticPriceOracle
// ═══════════════════════════════════════════════════════════════════

mod static_oracle {
    use super::*;

    #[tokio::test]
    async fn returns_only_known_tickers() {
        let oracle = StaticPriceOracle::new()
            .with_quote("VTI", dec!(300), "usd")
            .with_quote("7203.T", dec!(2800), "JPY");
        let quotes = oracle.fetch_quotes(&tickers(&["VTI", "GLD"])).await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes["VTI"].native_currency, "USD");
    }

    #[tokio::test]
    async fn set_quote_overwrites() {
        let mut oracle = StaticPriceOracle::new().with_quote("VTI", dec!(300), "USD");
        oracle.set_quote(Quote::new("VTI", dec!(310), "USD"));
        let quotes = oracle.fetch_quotes(&tickers(&["VTI"])).await.unwrap();
        assert_eq!(quotes["VTI"].native_price, dec!(310));
    }

    #[tokio::test]
    async fn direct_rate() {
        let mut oracle = StaticPriceOracle::new();
        oracle.set_rate(ExchangeRate::new("USD", "JPY", dec!(151.2)));
        let rate = oracle.fetch_rate("usd", "jpy").await.unwrap();
        assert_eq!(rate.from_currency, "USD");
        assert_eq!(rate.to_currency, "JPY");
        assert_eq!(rate.rate, dec!(151.2));
    }

    #[tokio::test]
    async fn unknown_rate_is_missing_rate() {
        let oracle = StaticPriceOracle::new().with_rate("USD", "JPY", dec!(150));
        assert!(matches!(
            oracle.fetch_rate("EUR", "JPY").await,
            Err(CoreError::MissingRate { .. })
        ));
    }

    #[test]
    fn name() {
        assert_eq!(StaticPriceOracle::new().name(), "Static");
    }
}

// ═══════════════════════════════════════════════════════════════════
// OracleRegistry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn starts_empty() {
        let registry = OracleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.name(), "registry");
    }

    #[test]
    fn defaults_register_yahoo() {
        let registry = OracleRegistry::new_with_defaults(&Settings::default().currency_hints);
        assert_eq!(registry.names(), vec!["Yahoo Finance"]);
    }

    #[tokio::test]
    async fn first_oracle_with_a_rate_wins() {
        let mut registry = OracleRegistry::new();
        registry.register(Box::new(StaticPriceOracle::new().with_rate("USD", "JPY", dec!(150))));
        registry.register(Box::new(StaticPriceOracle::new().with_rate("USD", "JPY", dec!(999))));
        let rate = registry.fetch_rate("USD", "JPY").await.unwrap();
        assert_eq!(rate.rate, dec!(150));
    }

    #[tokio::test]
    async fn missing_everywhere_returns_last_error() {
        let mut registry = OracleRegistry::new();
        registry.register(Box::new(StaticPriceOracle::new()));
        assert!(matches!(
            registry.fetch_rate("USD", "JPY").await,
            Err(CoreError::MissingRate { .. })
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// YahooFinanceOracle — currency resolution (no network)
// ═══════════════════════════════════════════════════════════════════

mod yahoo {
    use super::*;

    fn oracle() -> YahooFinanceOracle {
        let mut hints: HashMap<String, String> = Settings::default().currency_hints;
        hints.insert("GLD".into(), "usd".into());
        hints.insert(".L".into(), "GBP".into());
        YahooFinanceOracle::new(hints).unwrap()
    }

    #[test]
    fn suffix_hints() {
        let yahoo = oracle();
        assert_eq!(yahoo.native_currency("7203.T"), "JPY");
        assert_eq!(yahoo.native_currency("BTC-USD"), "USD");
        assert_eq!(yahoo.native_currency("VOD.L"), "GBP");
    }

    #[test]
    fn exact_hint_is_normalized() {
        assert_eq!(oracle().native_currency("GLD"), "USD");
    }

    #[test]
    fn default_is_usd() {
        assert_eq!(oracle().native_currency("VTI"), "USD");
    }

    #[test]
    fn name() {
        assert_eq!(oracle().name(), "Yahoo Finance");
    }
}
