use serde::{Deserialize, Serialize};

use super::snapshot::PortfolioSnapshot;

/// Grouping shown on the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Milestone,
    Consistency,
    Accumulation,
    Frequency,
    Investment,
    Performance,
    Resilience,
}

impl std::fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AchievementCategory::Milestone => "milestone",
            AchievementCategory::Consistency => "consistency",
            AchievementCategory::Accumulation => "accumulation",
            AchievementCategory::Frequency => "frequency",
            AchievementCategory::Investment => "investment",
            AchievementCategory::Performance => "performance",
            AchievementCategory::Resilience => "resilience",
        };
        write!(f, "{name}")
    }
}

/// A numeric field of [`PortfolioSnapshot`] a rule can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotField {
    TotalBtc,
    TotalInvested,
    CurrentValue,
    UnrealizedPnlPercent,
    TotalTransactions,
    LongestStreakWeeks,
    MaxDrawdownPercent,
}

impl SnapshotField {
    pub fn value(self, snapshot: &PortfolioSnapshot) -> f64 {
        match self {
            SnapshotField::TotalBtc => snapshot.total_btc,
            SnapshotField::TotalInvested => snapshot.total_invested,
            SnapshotField::CurrentValue => snapshot.current_value,
            SnapshotField::UnrealizedPnlPercent => snapshot.unrealized_pnl_percent,
            SnapshotField::TotalTransactions => snapshot.total_transactions as f64,
            SnapshotField::LongestStreakWeeks => f64::from(snapshot.longest_streak_weeks),
            SnapshotField::MaxDrawdownPercent => snapshot.max_drawdown_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// `value >= threshold`
    AtLeast,
    /// `value > threshold`
    GreaterThan,
}

impl Comparison {
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => value >= threshold,
            Comparison::GreaterThan => value > threshold,
        }
    }
}

/// How an achievement is unlocked and how its progress bar fills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementRule {
    /// Unlocked at `field >= threshold`; progress is `field / threshold × 100`.
    Threshold { field: SnapshotField, threshold: f64 },

    /// Unlocked when the comparison holds; progress is all-or-nothing.
    Flag {
        field: SnapshotField,
        comparison: Comparison,
        threshold: f64,
    },
}

impl AchievementRule {
    pub fn is_unlocked(&self, snapshot: &PortfolioSnapshot) -> bool {
        match *self {
            AchievementRule::Threshold { field, threshold } => {
                Comparison::AtLeast.holds(field.value(snapshot), threshold)
            }
            AchievementRule::Flag {
                field,
                comparison,
                threshold,
            } => comparison.holds(field.value(snapshot), threshold),
        }
    }

    /// Progress towards unlocking, always within 0–100.
    pub fn progress(&self, snapshot: &PortfolioSnapshot) -> f64 {
        let raw = match *self {
            AchievementRule::Threshold { field, threshold } if threshold > 0.0 => {
                field.value(snapshot) / threshold * 100.0
            }
            _ if self.is_unlocked(snapshot) => 100.0,
            _ => 0.0,
        };
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 100.0)
        }
    }
}

/// One entry of the achievement catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    /// Unique key, also what the seen set stores
    pub id: String,
    pub title: String,
    pub description: String,

    /// Icon name for the badge (Font Awesome class)
    #[serde(default)]
    pub icon: String,

    pub category: AchievementCategory,
    pub rule: AchievementRule,
}

impl AchievementDefinition {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        category: AchievementCategory,
        rule: AchievementRule,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            category,
            rule,
        }
    }
}

/// Evaluated state of a single achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub id: String,
    pub unlocked: bool,

    /// 0–100
    pub progress: f64,
}

/// Badge counter for the achievements header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,

    /// `unlocked / total × 100`, 0 for an empty catalog
    pub percent: f64,
}
