use chrono::{Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::chart::Timeframe;
use crate::models::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionSortOrder};

/// Manages the purchase history: validated inserts, removals, listings.
///
/// Pure business logic, no I/O.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Add a purchase, keeping the ledger sorted by date.
    /// Purchases on the same date keep their insertion order.
    pub fn add_transaction(&self, ledger: &mut Ledger, transaction: Transaction) -> Result<(), CoreError> {
        self.validate_transaction(ledger, &transaction)?;
        Self::sorted_insert(&mut ledger.transactions, transaction);
        Ok(())
    }

    /// Remove a purchase by id and hand it back.
    pub fn remove_transaction(&self, ledger: &mut Ledger, id: Uuid) -> Result<Transaction, CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        Ok(ledger.transactions.remove(idx))
    }

    /// All purchases, newest first (display order).
    pub fn get_transactions<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Transaction> {
        self.get_sorted(ledger, &TransactionSortOrder::DateDesc)
    }

    /// All purchases in the requested order. Sorting is stable.
    pub fn get_sorted<'a>(&self, ledger: &'a Ledger, order: &TransactionSortOrder) -> Vec<&'a Transaction> {
        let mut txs: Vec<&Transaction> = ledger.transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => txs.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSortOrder::DateAsc => txs.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSortOrder::AmountDesc => txs.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            TransactionSortOrder::AmountAsc => txs.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            TransactionSortOrder::PriceDesc => {
                txs.sort_by(|a, b| b.effective_price().total_cmp(&a.effective_price()))
            }
            TransactionSortOrder::PriceAsc => {
                txs.sort_by(|a, b| a.effective_price().total_cmp(&b.effective_price()))
            }
        }
        txs
    }

    /// Purchases on or after `today` minus the timeframe, oldest first.
    pub fn filter_by_timeframe<'a>(
        &self,
        transactions: &'a [Transaction],
        timeframe: Timeframe,
        today: NaiveDate,
    ) -> Vec<&'a Transaction> {
        let cutoff = timeframe
            .months()
            .and_then(|months| today.checked_sub_months(Months::new(months)));

        let mut txs: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| cutoff.map_or(true, |c| tx.date >= c))
            .collect();
        txs.sort_by_key(|tx| tx.date);
        txs
    }

    /// Validate a purchase before it enters the ledger.
    ///
    /// Rules:
    /// - Amount spent and BTC received must be positive
    /// - A reported rate must not be negative
    /// - Date can't be in the future (+1 day tolerance for timezones)
    /// - The id must not already be in the ledger
    fn validate_transaction(&self, ledger: &Ledger, tx: &Transaction) -> Result<(), CoreError> {
        if ledger.transactions.iter().any(|existing| existing.id == tx.id) {
            return Err(CoreError::ValidationError(format!(
                "Transaction {} is already in the ledger",
                tx.id
            )));
        }

        if !(tx.amount.is_finite() && tx.amount > 0.0) {
            return Err(CoreError::ValidationError(
                "Amount spent must be positive".into(),
            ));
        }

        if !(tx.btc_received.is_finite() && tx.btc_received > 0.0) {
            return Err(CoreError::ValidationError(
                "BTC received must be positive".into(),
            ));
        }

        if let Some(rate) = tx.rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Rate {rate} is not a valid price"
                )));
            }
        }

        let today = Utc::now().date_naive();
        if let Some(tomorrow) = today.succ_opt() {
            if tx.date > tomorrow {
                return Err(CoreError::ValidationError(format!(
                    "Purchase date {} is in the future",
                    tx.date
                )));
            }
        }

        Ok(())
    }

    /// Insert after any purchases with the same date, in O(log n) search.
    fn sorted_insert(transactions: &mut Vec<Transaction>, tx: Transaction) {
        let pos = transactions.partition_point(|t| t.date <= tx.date);
        transactions.insert(pos, tx);
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
