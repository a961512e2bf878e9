pub mod holding;
pub mod notification;
pub mod quote;
pub mod settings;
pub mod snapshot;
pub mod transaction;
pub mod valuation;
