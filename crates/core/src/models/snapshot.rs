use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point-in-time aggregate of the whole ledger at a given BTC price.
///
/// Recomputed whenever the price or the transaction set changes; this is the
/// only input achievements are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Sum of BTC received over all purchases
    pub total_btc: f64,

    /// Sum of fiat spent over all purchases
    pub total_invested: f64,

    /// `total_btc × current price`
    pub current_value: f64,

    /// `(current_value - total_invested) / total_invested × 100`, 0 when nothing is invested
    pub unrealized_pnl_percent: f64,

    pub total_transactions: usize,

    pub longest_streak_weeks: u32,

    /// Largest peak-to-trough price decline held through, in percent
    pub max_drawdown_percent: f64,
}

/// Headline numbers for the metrics cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerMetrics {
    pub total_invested: f64,
    pub total_btc: f64,

    /// `total_invested / total_btc`, 0 when no BTC is held
    pub avg_cost_basis: f64,

    pub transaction_count: usize,

    /// Date of the earliest purchase, if any
    pub first_purchase: Option<NaiveDate>,

    /// Date of the most recent purchase, if any
    pub last_purchase: Option<NaiveDate>,
}
