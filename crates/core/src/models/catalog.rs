use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::achievement::{
    AchievementCategory as Cat, AchievementDefinition, AchievementRule, Comparison, SnapshotField,
};

/// An ordered, id-unique list of achievement definitions.
///
/// Declaration order is the order achievements are evaluated, reported and
/// notified in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AchievementCatalog {
    definitions: Vec<AchievementDefinition>,
}

impl AchievementCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(definitions: Vec<AchievementDefinition>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.id.as_str()) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate achievement id '{}'",
                    def.id
                )));
            }
        }
        Ok(Self { definitions })
    }

    /// Load a catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let definitions: Vec<AchievementDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    /// The built-in 14-entry catalog.
    pub fn standard() -> Self {
        use AchievementRule::{Flag, Threshold};
        use SnapshotField::*;

        let definitions = vec![
            AchievementDefinition::new(
                "first_purchase",
                "First Steps",
                "Made your first Bitcoin purchase",
                "fa-baby",
                Cat::Milestone,
                Flag { field: TotalTransactions, comparison: Comparison::AtLeast, threshold: 1.0 },
            ),
            AchievementDefinition::new(
                "week_consistent",
                "Consistent Stacker",
                "Purchased Bitcoin for 4 weeks straight",
                "fa-calendar-check",
                Cat::Consistency,
                Threshold { field: LongestStreakWeeks, threshold: 4.0 },
            ),
            // Same gate as week_consistent, kept as a separate badge.
            AchievementDefinition::new(
                "month_consistent",
                "Monthly Discipline",
                "Maintained DCA for a full month",
                "fa-medal",
                Cat::Consistency,
                Threshold { field: LongestStreakWeeks, threshold: 4.0 },
            ),
            AchievementDefinition::new(
                "satoshi_million",
                "Satoshi Millionaire",
                "Accumulated 1,000,000 satoshis",
                "fa-coins",
                Cat::Accumulation,
                Threshold { field: TotalBtc, threshold: 0.01 },
            ),
            AchievementDefinition::new(
                "tenth_bitcoin",
                "Tenth Bitcoin",
                "Reached 0.1 BTC milestone",
                "fa-trophy",
                Cat::Milestone,
                Threshold { field: TotalBtc, threshold: 0.1 },
            ),
            AchievementDefinition::new(
                "quarter_bitcoin",
                "Quarter Bitcoin",
                "Accumulated 0.25 BTC",
                "fa-star",
                Cat::Milestone,
                Threshold { field: TotalBtc, threshold: 0.25 },
            ),
            AchievementDefinition::new(
                "half_bitcoin",
                "Half Bitcoin",
                "Reached the 0.5 BTC milestone",
                "fa-shield-halved",
                Cat::Milestone,
                Threshold { field: TotalBtc, threshold: 0.5 },
            ),
            AchievementDefinition::new(
                "whole_bitcoin",
                "Whole Coiner",
                "Accumulated 1 full Bitcoin!",
                "fa-crown",
                Cat::Milestone,
                Threshold { field: TotalBtc, threshold: 1.0 },
            ),
            AchievementDefinition::new(
                "ten_purchases",
                "Dedicated Stacker",
                "Made 10 Bitcoin purchases",
                "fa-layer-group",
                Cat::Frequency,
                Threshold { field: TotalTransactions, threshold: 10.0 },
            ),
            AchievementDefinition::new(
                "fifty_purchases",
                "DCA Master",
                "Completed 50 DCA purchases",
                "fa-graduation-cap",
                Cat::Frequency,
                Threshold { field: TotalTransactions, threshold: 50.0 },
            ),
            AchievementDefinition::new(
                "thousand_invested",
                "Serious Investor",
                "Invested $1,000 in Bitcoin",
                "fa-chart-line",
                Cat::Investment,
                Threshold { field: TotalInvested, threshold: 1000.0 },
            ),
            AchievementDefinition::new(
                "five_thousand_invested",
                "Big Stacker",
                "Invested $5,000 in Bitcoin",
                "fa-rocket",
                Cat::Investment,
                Threshold { field: TotalInvested, threshold: 5000.0 },
            ),
            AchievementDefinition::new(
                "profitable",
                "In The Green",
                "Portfolio showing positive returns",
                "fa-arrow-trend-up",
                Cat::Performance,
                Flag { field: UnrealizedPnlPercent, comparison: Comparison::GreaterThan, threshold: 0.0 },
            ),
            AchievementDefinition::new(
                "diamond_hands",
                "Diamond Hands",
                "Held through a -20% price drop",
                "fa-gem",
                Cat::Resilience,
                Flag { field: MaxDrawdownPercent, comparison: Comparison::AtLeast, threshold: 20.0 },
            ),
        ];

        Self { definitions }
    }

    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for AchievementCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for AchievementCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let definitions = Vec::<AchievementDefinition>::deserialize(deserializer)?;
        Self::new(definitions).map_err(serde::de::Error::custom)
    }
}
