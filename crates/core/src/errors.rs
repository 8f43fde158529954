use thiserror::Error;

/// Unified error type for the entire dca-ledger-core library.
///
/// The analytics services never fail; errors only come from importing data,
/// mutating the ledger, and persisting state.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Import / Export ─────────────────────────────────────────────
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Transaction validation failed: {0}")]
    ValidationError(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Unknown achievement: {0}")]
    UnknownAchievement(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        match e.position() {
            Some(pos) => CoreError::InvalidRecord {
                line: pos.line(),
                message: e.to_string(),
            },
            None => CoreError::Csv(e.to_string()),
        }
    }
}
