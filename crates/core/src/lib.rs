pub mod errors;
pub mod loader;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    achievement::{AchievementDefinition, AchievementStatus, AchievementSummary},
    catalog::AchievementCatalog,
    chart::{CumulativePoint, PricePoint, Timeframe},
    insights::InsightSummary,
    ledger::Ledger,
    settings::{Settings, Theme},
    snapshot::{LedgerMetrics, PortfolioSnapshot},
    transaction::{Transaction, TransactionSortOrder},
};
use services::{
    achievement_service::AchievementEvaluator, chart_service::ChartService,
    currency_service::CurrencyService, insights_service::InsightsService,
    ledger_service::LedgerService, snapshot_service::SnapshotService,
};
use storage::seen::SeenSet;
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the DCA ledger core library.
/// Holds the purchase history, settings, the achievement catalog and all
/// services needed to derive insights from them.
///
/// Derived views never read the clock or fetch prices: callers pass `today` and
/// the current BTC price in, and re-run them whenever either changes. Only the
/// future-date check on new purchases looks at the system date.
#[must_use]
pub struct DcaLedger {
    ledger: Ledger,
    ledger_service: LedgerService,
    insights_service: InsightsService,
    snapshot_service: SnapshotService,
    chart_service: ChartService,
    currency_service: CurrencyService,
    evaluator: AchievementEvaluator,
    /// Tracks whether any mutation has occurred since the last export.
    dirty: bool,
}

impl std::fmt::Debug for DcaLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DcaLedger")
            .field("transactions", &self.ledger.transactions.len())
            .field("settings", &self.ledger.settings)
            .field("achievements", &self.evaluator.catalog().len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl DcaLedger {
    /// Create an empty ledger with default settings and the standard catalog.
    pub fn create_new() -> Self {
        Self::build(Ledger::new(), AchievementCatalog::standard())
    }

    /// Create a ledger from existing purchases. All-or-nothing: if any
    /// purchase fails validation, no ledger is created.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, CoreError> {
        let mut dca = Self::create_new();
        dca.add_transactions(transactions)?;
        dca.dirty = false;
        Ok(dca)
    }

    /// Use a custom achievement catalog instead of the standard one.
    pub fn with_catalog(mut self, catalog: AchievementCatalog) -> Self {
        self.evaluator = AchievementEvaluator::new(catalog);
        self
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Record a purchase. Returns its id.
    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        amount: f64,
        btc_received: f64,
        rate: Option<f64>,
    ) -> Result<Uuid, CoreError> {
        let tx = Transaction::new(date, amount, btc_received, rate);
        let id = tx.id;
        self.ledger_service.add_transaction(&mut self.ledger, tx)?;
        self.dirty = true;
        Ok(id)
    }

    /// Add multiple purchases at once. All are validated first;
    /// if any fails, none are added. Returns their ids.
    pub fn add_transactions(&mut self, transactions: Vec<Transaction>) -> Result<Vec<Uuid>, CoreError> {
        let mut temp_ledger = self.ledger.clone();
        let mut ids = Vec::with_capacity(transactions.len());

        for tx in transactions {
            ids.push(tx.id);
            self.ledger_service.add_transaction(&mut temp_ledger, tx)?;
        }

        self.ledger = temp_ledger;
        self.dirty = true;
        Ok(ids)
    }

    /// Remove a purchase by id and return it.
    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction, CoreError> {
        let removed = self.ledger_service.remove_transaction(&mut self.ledger, id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Get a single purchase by id.
    #[must_use]
    pub fn get_transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|tx| tx.id == id)
    }

    /// All purchases, newest first.
    #[must_use]
    pub fn get_transactions(&self) -> Vec<&Transaction> {
        self.ledger_service.get_transactions(&self.ledger)
    }

    /// All purchases in a specific order.
    #[must_use]
    pub fn get_transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&Transaction> {
        self.ledger_service.get_sorted(&self.ledger, order)
    }

    /// Purchases inside a look-back window ending `today`, oldest first.
    #[must_use]
    pub fn get_transactions_in_timeframe(&self, timeframe: Timeframe, today: NaiveDate) -> Vec<&Transaction> {
        self.ledger_service
            .filter_by_timeframe(&self.ledger.transactions, timeframe, today)
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    // ── Insights & Metrics ──────────────────────────────────────────

    /// Full insights panel as of `today`.
    #[must_use]
    pub fn insights(&self, today: NaiveDate) -> InsightSummary {
        self.insights_service
            .compute_insights(&self.ledger.transactions, today)
    }

    /// Headline totals (invested, BTC, average cost).
    #[must_use]
    pub fn metrics(&self) -> LedgerMetrics {
        self.snapshot_service.compute_metrics(&self.ledger.transactions)
    }

    /// Aggregate at the given BTC price.
    #[must_use]
    pub fn snapshot(&self, current_price: f64, today: NaiveDate) -> PortfolioSnapshot {
        self.snapshot_service
            .compute_snapshot(&self.ledger.transactions, current_price, today)
    }

    // ── Achievements ────────────────────────────────────────────────

    /// Recompute the snapshot and evaluate every achievement against it.
    #[must_use]
    pub fn evaluate_achievements(&self, current_price: f64, today: NaiveDate) -> Vec<AchievementStatus> {
        let snapshot = self.snapshot(current_price, today);
        self.evaluator.evaluate(&snapshot)
    }

    /// Achievements unlocked at this price that haven't been announced yet.
    /// Marks them as seen in `seen`.
    pub fn check_new_achievements(
        &self,
        current_price: f64,
        today: NaiveDate,
        seen: &mut SeenSet,
    ) -> Vec<&AchievementDefinition> {
        let evaluation = self.evaluate_achievements(current_price, today);
        self.evaluator.check_newly_unlocked(&evaluation, seen)
    }

    /// Evaluated state of one achievement.
    pub fn achievement_status(
        &self,
        id: &str,
        current_price: f64,
        today: NaiveDate,
    ) -> Result<AchievementStatus, CoreError> {
        self.evaluate_achievements(current_price, today)
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::UnknownAchievement(id.to_string()))
    }

    #[must_use]
    pub fn achievement_summary(&self, current_price: f64, today: NaiveDate) -> AchievementSummary {
        let evaluation = self.evaluate_achievements(current_price, today);
        self.evaluator.summary(&evaluation)
    }

    #[must_use]
    pub fn catalog(&self) -> &AchievementCatalog {
        self.evaluator.catalog()
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Execution prices inside `timeframe`, scaled by a currency `ratio`.
    #[must_use]
    pub fn price_chart(&self, timeframe: Timeframe, ratio: f64, today: NaiveDate) -> Vec<PricePoint> {
        self.chart_service
            .price_series(&self.ledger.transactions, timeframe, ratio, today)
    }

    /// Running invested / BTC totals.
    #[must_use]
    pub fn growth_chart(&self) -> Vec<CumulativePoint> {
        self.chart_service.cumulative_series(&self.ledger.transactions)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency (e.g., "AUD", "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.ledger.settings.currency = self.currency_service.normalize_code(currency)?;
        self.dirty = true;
        Ok(())
    }

    /// Flip the achievement sound preference and return the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.ledger.settings.sound_enabled = !self.ledger.settings.sound_enabled;
        self.dirty = true;
        self.ledger.settings.sound_enabled
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.ledger.settings.theme = theme;
        self.dirty = true;
    }

    /// Replace all settings, e.g. with ones restored from a state store.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        let currency = self.currency_service.normalize_code(&settings.currency)?;
        self.ledger.settings = Settings { currency, ..settings };
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Parse CSV text and add every valid row. Returns how many were added.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, CoreError> {
        let transactions = loader::parse_transactions_csv(text)?;
        let count = transactions.len();
        self.add_transactions(transactions)?;
        Ok(count)
    }

    /// Export purchases, oldest first, in the CSV import layout.
    pub fn export_csv(&mut self) -> Result<String, CoreError> {
        let csv = loader::write_transactions_csv(&self.ledger.transactions)?;
        self.dirty = false;
        Ok(csv)
    }

    /// Export all purchases as a JSON array.
    pub fn export_json(&mut self) -> Result<String, CoreError> {
        let json = serde_json::to_string_pretty(&self.ledger.transactions)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transactions to JSON: {e}")))?;
        self.dirty = false;
        Ok(json)
    }

    /// Import purchases from a JSON array. Returns how many were added.
    pub fn import_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let transactions: Vec<Transaction> = serde_json::from_str(json)?;
        let count = transactions.len();
        self.add_transactions(transactions)?;
        Ok(count)
    }

    /// Returns `true` if the ledger changed since it was created or last exported.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger, catalog: AchievementCatalog) -> Self {
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            insights_service: InsightsService::new(),
            snapshot_service: SnapshotService::new(),
            chart_service: ChartService::new(),
            currency_service: CurrencyService::new(),
            evaluator: AchievementEvaluator::new(catalog),
            dirty: false,
        }
    }
}
