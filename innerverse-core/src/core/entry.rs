//! Journal entries and the inputs used to create and edit them.

use crate::{JournalError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Optional mood tag attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Neutral,
    Excited,
    Anxious,
}

/// A single journaled note belonging to one category.
///
/// `category_id` is not checked against the category collection; an entry
/// whose category no longer exists simply appears under no listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new entry. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewEntry {
    /// Checks the fields the entry form requires before saving.
    ///
    /// The store itself never calls this; it accepts whatever it is given.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::ValidationFailed`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.title, "Please enter a title")?;
        require_text(&self.content, "Please enter a description")?;
        require_text(&self.category_id, "Please select a category")?;
        Ok(())
    }
}

/// A partial update to an entry. Present fields overwrite, absent ones are kept.
///
/// `image` and `mood` are doubly optional: `Some(None)` clears the value.
/// Changing `category_id` does not move the entry between category counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "double_option")]
    pub mood: Option<Option<Mood>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl EntryPatch {
    /// Checks that any text field present in the patch is non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::ValidationFailed`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text(title, "Please enter a title")?;
        }
        if let Some(content) = &self.content {
            require_text(content, "Please enter a description")?;
        }
        if let Some(category_id) = &self.category_id {
            require_text(category_id, "Please select a category")?;
        }
        Ok(())
    }
}

impl JournalEntry {
    pub(crate) fn from_new(id: String, data: NewEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            content: data.content,
            category_id: data.category_id,
            image: data.image,
            mood: data.mood,
            tags: data.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges `patch` into this entry and bumps `updated_at`.
    pub(crate) fn apply_patch(&mut self, patch: &EntryPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(category_id) = &patch.category_id {
            self.category_id = category_id.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        self.updated_at = now;
    }
}

fn require_text(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(JournalError::ValidationFailed(message.to_string()));
    }
    Ok(())
}

/// Maps a present JSON field (including `null`) to `Some(_)`, so that
/// `"image": null` clears the image while a missing field leaves it alone.
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
