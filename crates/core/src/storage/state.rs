use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::CoreError;
use crate::models::settings::Settings;

use super::seen::SeenSet;

/// Everything that survives between sessions apart from the purchase data:
/// which achievements were announced, plus display preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub seen_achievements: SeenSet,

    #[serde(default)]
    pub settings: Settings,
}

impl LedgerState {
    /// Serialize to JSON bytes (portable, for hosts that do their own file I/O).
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger state: {e}")))
    }

    /// Parse state previously written by [`LedgerState::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger state: {e}")))
    }
}

/// Where [`LedgerState`] is kept between sessions.
///
/// One writer at a time: callers are expected to load, mutate and save from
/// a single event loop.
pub trait StateStore {
    fn load(&self) -> Result<LedgerState, CoreError>;
    fn save(&mut self, state: &LedgerState) -> Result<(), CoreError>;
}

/// Keeps state in memory only. Useful for tests and demo sessions.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: LedgerState,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<LedgerState, CoreError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &LedgerState) -> Result<(), CoreError> {
        self.state = state.clone();
        Ok(())
    }
}

/// Stores state as pretty-printed JSON in a single file (native only).
///
/// A missing file loads as the default (empty) state.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStateStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl StateStore for JsonFileStateStore {
    fn load(&self) -> Result<LedgerState, CoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => LedgerState::from_bytes(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerState::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, state: &LedgerState) -> Result<(), CoreError> {
        let bytes = state.to_bytes()?;
        std::fs::write(&self.path, bytes)?;
        info!(path = %self.path.display(), seen = state.seen_achievements.len(), "saved ledger state");
        Ok(())
    }
}
