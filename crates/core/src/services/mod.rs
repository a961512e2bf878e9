pub mod currency_service;
pub mod holding_service;
pub mod ledger_service;
pub mod market_data_service;
pub mod notification_service;
pub mod rebalance_service;
pub mod valuation_service;
