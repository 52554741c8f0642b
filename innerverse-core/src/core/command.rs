//! Mutation commands applied to a [`JournalState`](crate::JournalState).

use crate::{CategoryPatch, EntryPatch, NewCategory, NewEntry, SettingsPatch};
use chrono::{DateTime, Utc};

/// A single state mutation.
///
/// Commands carry everything needed to apply them deterministically: the
/// store assigns new ids and the wall-clock `timestamp` before dispatch, so
/// applying the same command to the same state always yields the same result.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new category.
    AddCategory {
        timestamp: DateTime<Utc>,
        /// ID assigned to the new category.
        category_id: String,
        data: NewCategory,
    },
    /// Merge fields into an existing category.
    UpdateCategory {
        timestamp: DateTime<Utc>,
        category_id: String,
        patch: CategoryPatch,
    },
    /// Remove a category and every entry that references it.
    DeleteCategory {
        timestamp: DateTime<Utc>,
        category_id: String,
    },
    /// Move the transient selection pointer. Never persisted.
    SelectCategory {
        timestamp: DateTime<Utc>,
        category_id: Option<String>,
    },
    /// Append a new entry and bump its category's count.
    AddEntry {
        timestamp: DateTime<Utc>,
        /// ID assigned to the new entry.
        entry_id: String,
        data: NewEntry,
    },
    /// Merge fields into an existing entry.
    UpdateEntry {
        timestamp: DateTime<Utc>,
        entry_id: String,
        patch: EntryPatch,
    },
    /// Remove an entry and decrement its category's count.
    DeleteEntry {
        timestamp: DateTime<Utc>,
        entry_id: String,
    },
    /// Shallow-merge into the settings record.
    UpdateSettings {
        timestamp: DateTime<Utc>,
        patch: SettingsPatch,
    },
    /// Replace settings with the defaults.
    ResetSettings { timestamp: DateTime<Utc> },
}

impl Command {
    /// Returns the wall-clock time at which this command was issued.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::AddCategory { timestamp, .. }
            | Self::UpdateCategory { timestamp, .. }
            | Self::DeleteCategory { timestamp, .. }
            | Self::SelectCategory { timestamp, .. }
            | Self::AddEntry { timestamp, .. }
            | Self::UpdateEntry { timestamp, .. }
            | Self::DeleteEntry { timestamp, .. }
            | Self::UpdateSettings { timestamp, .. }
            | Self::ResetSettings { timestamp } => *timestamp,
        }
    }

    /// Short name of the variant, used in log lines.
    #[must_use]
    pub fn command_type(&self) -> &'static str {
        match self {
            Self::AddCategory { .. } => "AddCategory",
            Self::UpdateCategory { .. } => "UpdateCategory",
            Self::DeleteCategory { .. } => "DeleteCategory",
            Self::SelectCategory { .. } => "SelectCategory",
            Self::AddEntry { .. } => "AddEntry",
            Self::UpdateEntry { .. } => "UpdateEntry",
            Self::DeleteEntry { .. } => "DeleteEntry",
            Self::UpdateSettings { .. } => "UpdateSettings",
            Self::ResetSettings { .. } => "ResetSettings",
        }
    }

    /// Whether applying this command changes the persisted snapshot.
    ///
    /// Only the selection pointer lives outside the snapshot.
    #[must_use]
    pub fn persists(&self) -> bool {
        !matches!(self, Self::SelectCategory { .. })
    }
}
