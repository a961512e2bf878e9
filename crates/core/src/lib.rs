pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use errors::CoreError;
use models::{
    holding::Holding,
    notification::NotificationEntry,
    quote::MarketData,
    settings::Settings,
    snapshot::Snapshot,
    transaction::{CashFlowSummary, SalaryEstimate, Transaction},
    valuation::{
        AllocationSlice, CategoryDeviation, OverviewSummary, PortfolioValuation, RebalanceLine,
    },
};
use providers::traits::PriceOracle;
use services::{
    holding_service::HoldingService,
    ledger_service::{LedgerPartition, LedgerService},
    market_data_service::MarketDataService,
    notification_service::NotificationService,
    rebalance_service::RebalanceService,
    valuation_service::ValuationService,
};
use storage::{encryption::KdfParams, manager::StorageManager, snapshot_codec::SnapshotCodec};

/// Label of the cash slice in the overall allocation.
pub const CASH_LABEL: &str = "Cash";

/// Main entry point for the Asset Dashboard core library.
///
/// Owns the session state (the `Snapshot`) and settings. Edits go through
/// `&mut self` and either apply completely or not at all. Everything derived
/// from the state (valuations, rebalancing, cash-flow figures) is recomputed
/// on every call from the state plus the caller's market data and `today`.
#[must_use]
pub struct AssetDashboard {
    state: Snapshot,
    settings: Settings,
    holding_service: HoldingService,
    ledger_service: LedgerService,
    notification_service: NotificationService,
    valuation_service: ValuationService,
    rebalance_service: RebalanceService,
    market_data_service: MarketDataService,
    /// Argon2id cost used when sealing backups
    kdf_params: KdfParams,
    /// Tracks whether any mutation has occurred since the last export/import.
    dirty: bool,
}

impl std::fmt::Debug for AssetDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetDashboard")
            .field("holdings", &self.state.holdings.len())
            .field("transactions", &self.state.transactions.len())
            .field("notifications", &self.state.notifications.len())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl AssetDashboard {
    /// Create an empty session with default settings.
    pub fn create_new() -> Self {
        Self::build(Snapshot::default(), Settings::default())
    }

    /// Create an empty session with the given settings.
    pub fn with_settings(mut settings: Settings) -> Result<Self, CoreError> {
        settings.normalize()?;
        Ok(Self::build(Snapshot::default(), settings))
    }

    /// Start a session from an already validated snapshot.
    pub fn from_snapshot(snapshot: Snapshot, mut settings: Settings) -> Result<Self, CoreError> {
        settings.normalize()?;
        snapshot.validate().map_err(CoreError::Schema)?;
        Ok(Self::build(snapshot, settings))
    }

    /// Current session state.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the reporting currency (e.g., "JPY", "USD").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_reporting_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let mut updated = self.settings.clone();
        updated.reporting_currency = currency.to_string();
        updated.normalize()?;
        self.settings = updated;
        Ok(())
    }

    // ── Holdings ────────────────────────────────────────────────────

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.state.holdings
    }

    #[must_use]
    pub fn get_holding(&self, ticker: &str) -> Option<&Holding> {
        self.state.holdings.iter().find(|h| h.ticker == ticker)
    }

    pub fn add_holding(&mut self, holding: Holding) -> Result<(), CoreError> {
        self.holding_service
            .add_holding(&mut self.state.holdings, holding)?;
        self.dirty = true;
        Ok(())
    }

    /// Add several holdings. If any is rejected, none are added (all-or-nothing).
    pub fn add_holdings(&mut self, holdings: Vec<Holding>) -> Result<(), CoreError> {
        let mut staged = self.state.holdings.clone();
        for holding in holdings {
            self.holding_service.add_holding(&mut staged, holding)?;
        }
        self.state.holdings = staged;
        self.dirty = true;
        Ok(())
    }

    pub fn update_holding(&mut self, ticker: &str, updated: Holding) -> Result<(), CoreError> {
        self.holding_service
            .update_holding(&mut self.state.holdings, ticker, updated)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_holding(&mut self, ticker: &str) -> Result<Holding, CoreError> {
        let removed = self
            .holding_service
            .remove_holding(&mut self.state.holdings, ticker)?;
        self.dirty = true;
        Ok(removed)
    }

    // ── Cash ────────────────────────────────────────────────────────

    #[must_use]
    pub fn cash_balance(&self) -> Decimal {
        self.state.cash_balance
    }

    /// Overwrite the cash balance. The ledger is not consulted or changed.
    pub fn set_cash_balance(&mut self, balance: Decimal) {
        self.state.cash_balance = balance;
        self.dirty = true;
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// All transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn append_transaction(&mut self, transaction: Transaction) -> Result<(), CoreError> {
        self.ledger_service
            .append(&mut self.state.transactions, transaction)?;
        self.dirty = true;
        Ok(())
    }

    /// Append the planned income entry for a salary estimate and return a copy of it.
    pub fn add_salary_estimate(&mut self, estimate: &SalaryEstimate) -> Result<Transaction, CoreError> {
        let transaction = self.ledger_service.salary_transaction(estimate)?;
        self.append_transaction(transaction.clone())?;
        Ok(transaction)
    }

    /// Mark the transaction at `index` (insertion order) as Completed.
    /// Idempotent. The cash balance is not adjusted.
    pub fn mark_transaction_completed(&mut self, index: usize) -> Result<(), CoreError> {
        self.ledger_service
            .mark_completed(&mut self.state.transactions, index)?;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn annual_income(&self, year: i32) -> Decimal {
        self.ledger_service
            .annual_income(&self.state.transactions, year)
    }

    #[must_use]
    pub fn future_expenses(&self, today: NaiveDate) -> Decimal {
        self.ledger_service
            .future_expenses(&self.state.transactions, today)
    }

    #[must_use]
    pub fn payment_capacity(&self, today: NaiveDate) -> Decimal {
        self.ledger_service
            .payment_capacity(&self.state.transactions, self.state.cash_balance, today)
    }

    #[must_use]
    pub fn cash_flow_summary(&self, today: NaiveDate) -> CashFlowSummary {
        self.ledger_service
            .summary(&self.state.transactions, self.state.cash_balance, today)
    }

    /// Upcoming (ascending) and past (newest first) transactions.
    #[must_use]
    pub fn partition_transactions(&self, today: NaiveDate) -> LedgerPartition<'_> {
        self.ledger_service
            .partition(&self.state.transactions, today)
    }

    // ── Notifications ───────────────────────────────────────────────

    /// Notification log, newest first.
    #[must_use]
    pub fn notifications(&self) -> &[NotificationEntry] {
        &self.state.notifications
    }

    pub fn append_notification(&mut self, entry: NotificationEntry) {
        self.notification_service
            .append(&mut self.state.notifications, entry);
        self.dirty = true;
    }

    /// Compare two observations of an FX pair and log a Warning when the move
    /// reaches the configured threshold. Returns the new entry, if any.
    pub fn check_fx_move(
        &mut self,
        from_currency: &str,
        to_currency: &str,
        previous_rate: Decimal,
        current_rate: Decimal,
        today: NaiveDate,
    ) -> Option<&NotificationEntry> {
        let entry = self.notification_service.check_fx_move(
            from_currency,
            to_currency,
            previous_rate,
            current_rate,
            self.settings.fx_move_threshold_pct,
            today,
        )?;
        self.append_notification(entry);
        self.state.notifications.first()
    }

    // ── Market Data ─────────────────────────────────────────────────

    /// Ask `oracle` for this cycle's quotes and rates. The result is handed
    /// back to the caller and never stored in the session.
    pub async fn fetch_market_data(&self, oracle: &dyn PriceOracle) -> MarketData {
        self.market_data_service
            .collect(oracle, &self.state.holdings, &self.settings.reporting_currency)
            .await
    }

    // ── Valuation & Rebalancing ─────────────────────────────────────

    /// Value all holdings in the reporting currency.
    #[must_use]
    pub fn value_portfolio(&self, market: &MarketData) -> PortfolioValuation {
        self.valuation_service.value(
            &self.state.holdings,
            &market.quotes,
            &market.fx,
            &self.settings.reporting_currency,
        )
    }

    /// Investable value (cash excluded).
    #[must_use]
    pub fn total_value(&self, valuation: &PortfolioValuation) -> Decimal {
        self.valuation_service.total_value(&valuation.holdings)
    }

    #[must_use]
    pub fn category_totals(&self, valuation: &PortfolioValuation) -> BTreeMap<String, Decimal> {
        self.valuation_service
            .group_by_category(&valuation.holdings)
    }

    /// Per-holding deviation against the investable total.
    #[must_use]
    pub fn rebalance(&self, valuation: &PortfolioValuation) -> Vec<RebalanceLine> {
        let total = self.total_value(valuation);
        self.rebalance_service.analyze(&valuation.holdings, total)
    }

    /// Per-category deviation against the investable total.
    #[must_use]
    pub fn rebalance_categories(&self, valuation: &PortfolioValuation) -> Vec<CategoryDeviation> {
        let total = self.total_value(valuation);
        self.rebalance_service
            .analyze_categories(&valuation.holdings, total)
    }

    /// Σ target_ratio over the holdings; display a warning when it is not 1.
    #[must_use]
    pub fn target_ratio_sum(&self) -> Decimal {
        self.rebalance_service
            .target_ratio_sum(&self.state.holdings)
    }

    /// Totals, cash ratio and allocation slices (categories, then cash).
    #[must_use]
    pub fn overview(&self, valuation: &PortfolioValuation) -> OverviewSummary {
        let total_investments = self.total_value(valuation);
        let cash_balance = self.state.cash_balance;
        let total_assets = total_investments.saturating_add(cash_balance);
        let cash_ratio = cash_balance.checked_div(total_assets);

        let mut allocation: Vec<AllocationSlice> = self
            .category_totals(valuation)
            .into_iter()
            .map(|(label, value)| AllocationSlice { label, value })
            .collect();
        allocation.push(AllocationSlice {
            label: CASH_LABEL.to_string(),
            value: cash_balance,
        });

        OverviewSummary {
            reporting_currency: valuation.reporting_currency.clone(),
            total_investments,
            cash_balance,
            total_assets,
            cash_ratio,
            allocation,
        }
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the session as a JSON snapshot document.
    /// Clears the unsaved-changes flag on success.
    pub fn export_snapshot(&mut self) -> Result<String, CoreError> {
        let document = SnapshotCodec::export(&self.state)?;
        self.dirty = false;
        Ok(document)
    }

    /// Replace the whole session state from a JSON document.
    /// On any error the current state is left untouched.
    pub fn import_snapshot(&mut self, document: &str) -> Result<(), CoreError> {
        let snapshot = SnapshotCodec::import(document)?;
        self.replace_state(snapshot);
        Ok(())
    }

    /// Key-derivation cost for future sealed backups. Opening always uses the
    /// parameters recorded in the backup header.
    pub fn set_kdf_params(&mut self, params: KdfParams) -> Result<(), CoreError> {
        params.check_bounds()?;
        self.kdf_params = params;
        Ok(())
    }

    /// Seal the session under a password (Argon2id + AES-256-GCM).
    pub fn seal_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::seal_with_params(&self.state, password, &self.kdf_params)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Replace the session state from a sealed backup. Atomic like `import_snapshot`.
    pub fn open_sealed(&mut self, data: &[u8], password: &str) -> Result<(), CoreError> {
        let snapshot = StorageManager::open_from_bytes(data, password)?;
        self.replace_state(snapshot);
        Ok(())
    }

    /// Write the JSON snapshot document to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::export_to_file(&self.state, path)?;
        self.dirty = false;
        Ok(())
    }

    /// Write a sealed backup to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn seal_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::seal_to_file(&self.state, path, password, &self.kdf_params)?;
        self.dirty = false;
        Ok(())
    }

    /// Replace the session state from a sealed backup on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_sealed_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        let snapshot = StorageManager::open_from_file(path, password)?;
        self.replace_state(snapshot);
        Ok(())
    }

    /// Replace the session state from a JSON document on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn import_from_file(&mut self, path: &str) -> Result<(), CoreError> {
        let snapshot = StorageManager::import_from_file(path)?;
        self.replace_state(snapshot);
        Ok(())
    }

    /// Returns `true` if the session has been modified since the last export or import.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn replace_state(&mut self, snapshot: Snapshot) {
        self.state = snapshot;
        self.dirty = false;
    }

    fn build(state: Snapshot, settings: Settings) -> Self {
        Self {
            state,
            settings,
            holding_service: HoldingService::new(),
            ledger_service: LedgerService::new(),
            notification_service: NotificationService::new(),
            valuation_service: ValuationService::new(),
            rebalance_service: RebalanceService::new(),
            market_data_service: MarketDataService::new(),
            kdf_params: KdfParams::default(),
            dirty: false,
        }
    }
}
