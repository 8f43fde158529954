use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How regularly purchases are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AverageTimeBetween {
    /// Mean gap between consecutive purchases, in whole days
    pub days: i64,

    /// 0–100; 100 means every gap is identical
    pub consistency_score: i64,
}

/// The largest or smallest purchase by fiat amount.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtremePurchase {
    pub amount: f64,

    /// `None` when there are no purchases
    pub date: Option<NaiveDate>,

    pub btc: f64,
}

/// Which end of the amount range to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Spread of execution prices across all purchases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceDistribution {
    pub min: f64,
    pub max: f64,

    /// Element at index `n / 2` of the sorted prices (upper median for even `n`)
    pub median: f64,
}

/// Runs of consecutive calendar weeks containing a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsistencyStreak {
    /// Trailing streak, or 0 if the last purchase week is more than 1.5 weeks ago
    pub current_weeks: u32,
    pub longest_weeks: u32,
}

/// Purchase cadence bucket derived from the mean gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    Irregular,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::BiWeekly => write!(f, "Bi-weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Irregular => write!(f, "Irregular"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentPattern {
    pub frequency: Frequency,

    /// e.g. "87% consistent"
    pub consistency_label: String,
}

impl InvestmentPattern {
    pub fn frequency_label(&self) -> String {
        self.frequency.to_string()
    }
}

/// Purchases rolled up into one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// `YYYY-MM`
    pub month: String,
    pub total_amount: f64,
    pub total_btc: f64,
    pub transaction_count: usize,

    /// `total_amount / total_btc`, or 0 when no BTC was received
    pub avg_price: f64,
}

/// Everything the insights panel shows, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub avg_time_between: AverageTimeBetween,
    pub largest_purchase: ExtremePurchase,
    pub smallest_purchase: ExtremePurchase,
    pub price_distribution: PriceDistribution,
    pub consistency_streak: ConsistencyStreak,
    pub investment_pattern: InvestmentPattern,

    /// Chronological, one entry per month with at least one purchase
    pub monthly_pattern: Vec<MonthlySummary>,
}
