use chrono::NaiveDate;
use tracing::debug;

use crate::models::snapshot::{LedgerMetrics, PortfolioSnapshot};
use crate::models::transaction::Transaction;
use crate::services::insights_service::InsightsService;

/// Builds the aggregates the dashboard and the achievement evaluator consume:
/// totals, average cost, unrealized P&L and drawdown.
///
/// All ratios are guarded: a ledger with nothing invested reports 0, never NaN.
pub struct SnapshotService {
    insights_service: InsightsService,
}

impl SnapshotService {
    pub fn new() -> Self {
        Self {
            insights_service: InsightsService::new(),
        }
    }

    /// Snapshot of the whole ledger at `current_price`.
    ///
    /// `today` is only used for the streak computation.
    pub fn compute_snapshot(
        &self,
        transactions: &[Transaction],
        current_price: f64,
        today: NaiveDate,
    ) -> PortfolioSnapshot {
        let total_btc: f64 = transactions.iter().map(|tx| tx.btc_received).sum();
        let total_invested: f64 = transactions.iter().map(|tx| tx.amount).sum();
        let current_value = total_btc * current_price;

        let unrealized_pnl_percent = if total_invested > 0.0 {
            (current_value - total_invested) / total_invested * 100.0
        } else {
            0.0
        };

        let streak = self
            .insights_service
            .compute_consistency_streak(transactions, today);

        let snapshot = PortfolioSnapshot {
            total_btc,
            total_invested,
            current_value,
            unrealized_pnl_percent,
            total_transactions: transactions.len(),
            longest_streak_weeks: streak.longest_weeks,
            max_drawdown_percent: self.max_drawdown_percent(transactions, current_price),
        };

        debug!(
            total_btc,
            total_invested,
            current_price,
            pnl = unrealized_pnl_percent,
            "computed portfolio snapshot"
        );
        snapshot
    }

    /// Largest peak-to-trough price decline seen while holding, in percent of the peak.
    ///
    /// Walks purchase prices in date order and finishes with `current_price`.
    /// Non-positive prices are skipped.
    pub fn max_drawdown_percent(&self, transactions: &[Transaction], current_price: f64) -> f64 {
        let mut dated: Vec<&Transaction> = transactions.iter().collect();
        dated.sort_by_key(|tx| tx.date);

        let prices = dated
            .iter()
            .map(|tx| tx.effective_price())
            .chain(std::iter::once(current_price))
            .filter(|price| price.is_finite() && *price > 0.0);

        let mut peak = 0.0_f64;
        let mut worst = 0.0_f64;
        for price in prices {
            peak = peak.max(price);
            let drawdown = (peak - price) / peak * 100.0;
            worst = worst.max(drawdown);
        }
        worst
    }

    /// Headline totals for the metrics cards.
    pub fn compute_metrics(&self, transactions: &[Transaction]) -> LedgerMetrics {
        let total_invested: f64 = transactions.iter().map(|tx| tx.amount).sum();
        let total_btc: f64 = transactions.iter().map(|tx| tx.btc_received).sum();

        LedgerMetrics {
            total_invested,
            total_btc,
            avg_cost_basis: if total_btc > 0.0 {
                total_invested / total_btc
            } else {
                0.0
            },
            transaction_count: transactions.len(),
            first_purchase: transactions.iter().map(|tx| tx.date).min(),
            last_purchase: transactions.iter().map(|tx| tx.date).max(),
        }
    }
}

impl Default for SnapshotService {
    fn default() -> Self {
        Self::new()
    }
}
