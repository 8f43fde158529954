use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Execution price of one purchase, in the display currency.
///
/// The core generates these and the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Running totals after each purchase, for the growth chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,

    /// Fiat invested up to and including this purchase
    pub invested: f64,

    /// BTC held up to and including this purchase
    pub btc: f64,

    /// `invested / btc` at this point
    pub avg_cost: f64,
}

/// Look-back window for charts and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    #[default]
    All,
}

impl Timeframe {
    /// Number of calendar months to look back, `None` for everything.
    pub fn months(self) -> Option<u32> {
        match self {
            Timeframe::OneMonth => Some(1),
            Timeframe::ThreeMonths => Some(3),
            Timeframe::SixMonths => Some(6),
            Timeframe::OneYear => Some(12),
            Timeframe::All => None,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::OneMonth => write!(f, "1M"),
            Timeframe::ThreeMonths => write!(f, "3M"),
            Timeframe::SixMonths => write!(f, "6M"),
            Timeframe::OneYear => write!(f, "1Y"),
            Timeframe::All => write!(f, "ALL"),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = crate::errors::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" => Ok(Timeframe::OneMonth),
            "3M" => Ok(Timeframe::ThreeMonths),
            "6M" => Ok(Timeframe::SixMonths),
            "1Y" => Ok(Timeframe::OneYear),
            "ALL" => Ok(Timeframe::All),
            other => Err(crate::errors::CoreError::ValidationError(format!(
                "Unknown timeframe '{other}' (expected 1M, 3M, 6M, 1Y or ALL)"
            ))),
        }
    }
}
