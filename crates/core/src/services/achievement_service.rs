use tracing::{debug, info};

use crate::models::achievement::{AchievementDefinition, AchievementStatus, AchievementSummary};
use crate::models::catalog::AchievementCatalog;
use crate::models::snapshot::PortfolioSnapshot;
use crate::storage::seen::SeenSet;

/// Evaluates an achievement catalog against a portfolio snapshot.
///
/// Unlocked state is never stored: it is recomputed from the snapshot on every
/// call. The only state that survives between calls is the caller's
/// [`SeenSet`], which decides whether an unlock is announced.
pub struct AchievementEvaluator {
    catalog: AchievementCatalog,
}

impl AchievementEvaluator {
    pub fn new(catalog: AchievementCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// Unlocked flag and progress for every definition, in catalog order.
    pub fn evaluate(&self, snapshot: &PortfolioSnapshot) -> Vec<AchievementStatus> {
        let statuses: Vec<AchievementStatus> = self
            .catalog
            .definitions()
            .iter()
            .map(|def| AchievementStatus {
                id: def.id.clone(),
                unlocked: def.rule.is_unlocked(snapshot),
                progress: def.rule.progress(snapshot),
            })
            .collect();

        debug!(
            unlocked = statuses.iter().filter(|s| s.unlocked).count(),
            total = statuses.len(),
            "evaluated achievements"
        );
        statuses
    }

    /// Definitions that are unlocked in `evaluation` but not yet in `seen`.
    ///
    /// Every returned id is added to `seen`, so a second call with the same
    /// inputs returns nothing. Results follow catalog order.
    pub fn check_newly_unlocked(
        &self,
        evaluation: &[AchievementStatus],
        seen: &mut SeenSet,
    ) -> Vec<&AchievementDefinition> {
        let mut fresh = Vec::new();

        for def in self.catalog.definitions() {
            let unlocked = evaluation.iter().any(|s| s.id == def.id && s.unlocked);
            if unlocked && seen.mark_seen(&def.id) {
                info!(id = %def.id, title = %def.title, "achievement unlocked");
                fresh.push(def);
            }
        }

        fresh
    }

    /// How many achievements are unlocked in `evaluation`.
    pub fn summary(&self, evaluation: &[AchievementStatus]) -> AchievementSummary {
        let total = self.catalog.len();
        let unlocked = self
            .catalog
            .definitions()
            .iter()
            .filter(|def| evaluation.iter().any(|s| s.id == def.id && s.unlocked))
            .count();

        AchievementSummary {
            unlocked,
            total,
            percent: if total > 0 {
                unlocked as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        }
    }
}

impl Default for AchievementEvaluator {
    fn default() -> Self {
        Self::new(AchievementCatalog::standard())
    }
}
