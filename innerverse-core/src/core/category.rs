//! Journal categories and the inputs used to create and edit them.

use crate::{JournalError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined grouping label for journal entries.
///
/// `count` is a cache of how many live entries reference this category.
/// It is maintained by [`JournalState`](crate::JournalState) on every entry
/// insert and delete; callers never adjust it directly except through a
/// [`CategoryPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new category. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub count: u32,
}

impl NewCategory {
    /// Checks the fields the category form requires before saving.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::ValidationFailed`] if the name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(JournalError::ValidationFailed(
                "Please enter a category name".to_string(),
            ));
        }
        Ok(())
    }
}

/// A partial update to a category. Present fields overwrite, absent ones are kept.
///
/// Setting `count` here bypasses the store's bookkeeping; the value is taken
/// as-is and never reconciled against the entry collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl Category {
    pub(crate) fn from_new(id: String, data: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            icon: data.icon,
            color: data.color,
            count: data.count,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges `patch` into this category and bumps `updated_at`.
    pub(crate) fn apply_patch(&mut self, patch: &CategoryPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(count) = patch.count {
            self.count = count;
        }
        self.updated_at = now;
    }

    pub(crate) fn increment_count(&mut self, now: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.updated_at = now;
    }

    /// Decrements the cached count, never going below zero.
    pub(crate) fn decrement_count(&mut self, now: DateTime<Utc>) {
        self.count = self.count.saturating_sub(1);
        self.updated_at = now;
    }
}
