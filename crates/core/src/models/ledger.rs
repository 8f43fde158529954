use serde::{Deserialize, Serialize};

use super::settings::Settings;
use super::transaction::Transaction;

/// The main data container: the purchase history plus display settings.
///
/// Transactions are kept sorted by date, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All purchases in the ledger
    pub transactions: Vec<Transaction>,

    /// User settings (display currency, sound, theme)
    #[serde(default)]
    pub settings: Settings,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }
}
