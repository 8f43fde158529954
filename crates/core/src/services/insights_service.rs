use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::models::insights::{
    AverageTimeBetween, ConsistencyStreak, Extreme, ExtremePurchase, Frequency, InsightSummary,
    InvestmentPattern, MonthlySummary, PriceDistribution,
};
use crate::models::transaction::Transaction;

/// Largest gap between two purchase weeks that still continues a streak (1.5 weeks).
const STREAK_GAP_DAYS: f64 = 10.5;

/// Derives statistics from the purchase history: timing regularity, extremes,
/// price spread, weekly streaks, cadence and monthly rollups.
///
/// Pure business logic with no I/O and no clock. Every function is total: empty or
/// degenerate input yields the zero/default value instead of an error.
/// Input order only matters for tie-breaking in [`find_extreme_purchase`].
///
/// [`find_extreme_purchase`]: InsightsService::find_extreme_purchase
pub struct InsightsService;

impl InsightsService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full insights panel.
    ///
    /// `today` anchors the "current streak" check.
    pub fn compute_insights(&self, transactions: &[Transaction], today: NaiveDate) -> InsightSummary {
        debug!(count = transactions.len(), %today, "computing insights");

        InsightSummary {
            avg_time_between: self.compute_average_time_between(transactions),
            largest_purchase: self.find_extreme_purchase(transactions, Extreme::Max),
            smallest_purchase: self.find_extreme_purchase(transactions, Extreme::Min),
            price_distribution: self.compute_price_distribution(transactions),
            consistency_streak: self.compute_consistency_streak(transactions, today),
            investment_pattern: self.classify_investment_pattern(transactions),
            monthly_pattern: self.compute_monthly_pattern(transactions),
        }
    }

    /// Mean gap between consecutive purchases and how evenly spaced they are.
    ///
    /// The consistency score is `100 - stddev/mean × 100` (population stddev),
    /// floored at 0. Fewer than two purchases, or a zero mean gap, score 0.
    pub fn compute_average_time_between(&self, transactions: &[Transaction]) -> AverageTimeBetween {
        if transactions.len() < 2 {
            return AverageTimeBetween::default();
        }

        let mut dates: Vec<NaiveDate> = transactions.iter().map(|tx| tx.date).collect();
        dates.sort();

        let gaps: Vec<f64> = dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days() as f64)
            .collect();

        let n = gaps.len() as f64;
        let mean = gaps.iter().sum::<f64>() / n;
        let variance = gaps.iter().map(|gap| (gap - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let consistency = if mean > 0.0 {
            (100.0 - (std_dev / mean * 100.0)).max(0.0)
        } else {
            0.0
        };

        AverageTimeBetween {
            days: mean.round() as i64,
            consistency_score: consistency.round() as i64,
        }
    }

    /// The largest or smallest purchase by fiat amount.
    ///
    /// Comparison is strict, so the first purchase reaching the extreme wins ties.
    pub fn find_extreme_purchase(&self, transactions: &[Transaction], extreme: Extreme) -> ExtremePurchase {
        let mut iter = transactions.iter();
        let Some(first) = iter.next() else {
            return ExtremePurchase::default();
        };

        let winner = iter.fold(first, |best, tx| {
            let better = match extreme {
                Extreme::Max => tx.amount > best.amount,
                Extreme::Min => tx.amount < best.amount,
            };
            if better {
                tx
            } else {
                best
            }
        });

        ExtremePurchase {
            amount: winner.amount,
            date: Some(winner.date),
            btc: winner.btc_received,
        }
    }

    /// Min, max and median of the effective execution prices.
    ///
    /// Purchases without a usable price are left out. The median is the
    /// element at index `n / 2`, i.e. the upper middle for an even count.
    pub fn compute_price_distribution(&self, transactions: &[Transaction]) -> PriceDistribution {
        let mut prices: Vec<f64> = transactions
            .iter()
            .map(Transaction::effective_price)
            .filter(|price| *price > 0.0)
            .collect();

        if prices.is_empty() {
            return PriceDistribution::default();
        }

        prices.sort_by(f64::total_cmp);

        PriceDistribution {
            min: prices[0],
            max: prices[prices.len() - 1],
            median: prices[prices.len() / 2],
        }
    }

    /// Current and longest runs of purchase weeks.
    ///
    /// Each purchase is bucketed by the Sunday starting its week. Consecutive
    /// buckets at most 1.5 weeks apart extend a run. The trailing run only
    /// counts as current if its last week started within 1.5 weeks of `today`.
    pub fn compute_consistency_streak(&self, transactions: &[Transaction], today: NaiveDate) -> ConsistencyStreak {
        let weeks: BTreeSet<NaiveDate> = transactions.iter().map(|tx| week_start(tx.date)).collect();

        let mut longest: u32 = 0;
        let mut run: u32 = 0;
        let mut previous: Option<NaiveDate> = None;

        for &week in &weeks {
            run = match previous {
                Some(prev) if (week - prev).num_days() as f64 <= STREAK_GAP_DAYS => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(week);
        }

        let current = match previous {
            Some(last) if (today - last).num_days() as f64 <= STREAK_GAP_DAYS => run,
            _ => 0,
        };

        ConsistencyStreak {
            current_weeks: current,
            longest_weeks: longest,
        }
    }

    /// Label the purchase cadence from the mean gap.
    ///
    /// ≤ 8 days is weekly, ≤ 15 bi-weekly, ≤ 35 monthly, anything longer is
    /// irregular. With fewer than two purchases there is no cadence yet, which
    /// is also reported as irregular.
    pub fn classify_investment_pattern(&self, transactions: &[Transaction]) -> InvestmentPattern {
        let avg = self.compute_average_time_between(transactions);

        let frequency = if transactions.len() < 2 {
            // A zero mean gap would otherwise land in the weekly bucket
            Frequency::Irregular
        } else {
            match avg.days {
                d if d <= 8 => Frequency::Weekly,
                d if d <= 15 => Frequency::BiWeekly,
                d if d <= 35 => Frequency::Monthly,
                _ => Frequency::Irregular,
            }
        };

        InvestmentPattern {
            frequency,
            consistency_label: format!("{}% consistent", avg.consistency_score),
        }
    }

    /// Roll purchases up per calendar month, oldest month first.
    pub fn compute_monthly_pattern(&self, transactions: &[Transaction]) -> Vec<MonthlySummary> {
        let mut months: BTreeMap<String, MonthlySummary> = BTreeMap::new();

        for tx in transactions {
            let key = tx.date.format("%Y-%m").to_string();
            let entry = months.entry(key.clone()).or_insert_with(|| MonthlySummary {
                month: key,
                total_amount: 0.0,
                total_btc: 0.0,
                transaction_count: 0,
                avg_price: 0.0,
            });
            entry.total_amount += tx.amount;
            entry.total_btc += tx.btc_received;
            entry.transaction_count += 1;
        }

        months
            .into_values()
            .map(|mut month| {
                month.avg_price = if month.total_btc > 0.0 {
                    month.total_amount / month.total_btc
                } else {
                    0.0
                };
                month
            })
            .collect()
    }
}

impl Default for InsightsService {
    fn default() -> Self {
        Self::new()
    }
}

/// The Sunday on or before `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
