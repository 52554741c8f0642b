//! The persisted journal blob.

use crate::{AppSettings, Category, JournalEntry, JournalState, Result};
use serde::{Deserialize, Serialize};

/// Storage key the journal snapshot is written under.
pub const STORAGE_KEY: &str = "innerverse-storage";

/// Top-level JSON structure stored under [`STORAGE_KEY`].
///
/// Exactly three fields and no version marker; the transient category
/// selection is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub entries: Vec<JournalEntry>,
    pub settings: AppSettings,
}

impl Snapshot {
    /// Copies the persisted parts of `state`.
    pub fn capture(state: &JournalState) -> Self {
        Self {
            categories: state.categories().to_vec(),
            entries: state.entries().to_vec(),
            settings: state.settings().clone(),
        }
    }

    /// Serialises the snapshot to its JSON blob.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JournalError::Json`] if serialisation fails.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a blob previously produced by [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// Returns [`crate::JournalError::Json`] if the blob is malformed or a
    /// field is missing.
    pub fn decode(blob: &str) -> Result<Self> {
        Ok(serde_json::from_str(blob)?)
    }

    /// Rebuilds a state with nothing selected.
    pub fn into_state(self) -> JournalState {
        JournalState::from_parts(self.categories, self.entries, self.settings)
    }
}
