use chrono::NaiveDate;

use crate::models::chart::{CumulativePoint, PricePoint, Timeframe};
use crate::models::transaction::Transaction;
use crate::services::currency_service::CurrencyService;
use crate::services::ledger_service::LedgerService;

/// Generates chart-ready data sets from the purchase history.
///
/// The core computes all the numbers; the frontend only renders.
/// Chart data includes:
/// - Execution price of every purchase in the display currency
/// - Running invested / BTC totals for the growth chart
pub struct ChartService {
    ledger_service: LedgerService,
    currency_service: CurrencyService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
            currency_service: CurrencyService::new(),
        }
    }

    /// One point per purchase inside `timeframe`, oldest first, priced at
    /// `effective_price × ratio`. Purchases without a usable price are skipped.
    pub fn price_series(
        &self,
        transactions: &[Transaction],
        timeframe: Timeframe,
        ratio: f64,
        today: NaiveDate,
    ) -> Vec<PricePoint> {
        self.ledger_service
            .filter_by_timeframe(transactions, timeframe, today)
            .into_iter()
            .filter_map(|tx| {
                let price = tx.effective_price();
                (price > 0.0).then(|| PricePoint {
                    date: tx.date,
                    price: self.currency_service.convert(price, ratio),
                })
            })
            .collect()
    }

    /// Running totals after each purchase, oldest first.
    pub fn cumulative_series(&self, transactions: &[Transaction]) -> Vec<CumulativePoint> {
        let mut dated: Vec<&Transaction> = transactions.iter().collect();
        dated.sort_by_key(|tx| tx.date);

        let mut invested = 0.0;
        let mut btc = 0.0;
        dated
            .into_iter()
            .map(|tx| {
                invested += tx.amount;
                btc += tx.btc_received;
                CumulativePoint {
                    date: tx.date,
                    invested,
                    btc,
                    avg_cost: if btc > 0.0 { invested / btc } else { 0.0 },
                }
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
