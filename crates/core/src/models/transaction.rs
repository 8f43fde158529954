use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest fiat amount first
    AmountDesc,
    /// Smallest fiat amount first
    AmountAsc,
    /// Highest execution price first
    PriceDesc,
    /// Lowest execution price first
    PriceAsc,
}

/// A single Bitcoin purchase.
///
/// `source`, `status` and `order_id` are carried for display only and never
/// take part in any calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Date of the purchase (daily granularity, no time component)
    pub date: NaiveDate,

    /// Exchange-local timestamp text, as exported by the exchange
    #[serde(default)]
    pub local_time: Option<String>,

    /// Fiat amount spent (always positive)
    pub amount: f64,

    /// BTC received for `amount`
    pub btc_received: f64,

    /// Price per BTC at execution, if the exchange reported one
    #[serde(default)]
    pub rate: Option<f64>,

    /// Exchange status text (e.g. "PROCESSED")
    #[serde(default)]
    pub status: String,

    /// Exchange name (e.g. "Swyftx", "Bitaroo")
    #[serde(default)]
    pub source: String,

    /// Exchange order reference
    #[serde(default)]
    pub order_id: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: f64, btc_received: f64, rate: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            local_time: None,
            amount,
            btc_received,
            rate,
            status: String::new(),
            source: String::new(),
            order_id: String::new(),
        }
    }

    /// Attach exchange metadata (source, status, order reference).
    pub fn with_source(
        mut self,
        source: impl Into<String>,
        status: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        self.source = source.into();
        self.status = status.into();
        self.order_id = order_id.into();
        self
    }

    /// Price per BTC actually paid.
    ///
    /// Uses the reported `rate` when it is a usable number, otherwise derives it
    /// as `amount / btc_received`. Returns 0 when neither is available.
    pub fn effective_price(&self) -> f64 {
        match self.rate {
            Some(rate) if rate.is_finite() && rate != 0.0 => rate,
            _ if self.btc_received > 0.0 => self.amount / self.btc_received,
            _ => 0.0,
        }
    }
}
