//! In-memory journal state and the pure transition function over it.
//!
//! [`JournalState::apply`] is the only place categories, entries and
//! settings change. It performs no I/O and reads no clock, which lets the
//! count bookkeeping be tested without any storage behind it.
//!
//! ## Count invariant
//!
//! For every category, `count` equals the number of entries whose
//! `category_id` matches its id, as long as all changes arrive as
//! [`Command`]s. Two documented paths break it: a [`CategoryPatch`](crate::CategoryPatch)
//! that sets `count` directly, and an [`EntryPatch`](crate::EntryPatch) that
//! changes `category_id` (counts are not moved).

use crate::core::seed;
use crate::{AppSettings, Category, Command, JournalEntry};
use chrono::{DateTime, Utc};

/// Whether a command altered the state it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    /// The command targeted an unknown id or set a value already in place.
    Unchanged,
}

/// Categories, entries and settings, plus the transient category selection.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalState {
    categories: Vec<Category>,
    entries: Vec<JournalEntry>,
    settings: AppSettings,
    selected_category: Option<String>,
}

impl JournalState {
    /// Builds a state from persisted collections with nothing selected.
    pub fn from_parts(
        categories: Vec<Category>,
        entries: Vec<JournalEntry>,
        settings: AppSettings,
    ) -> Self {
        Self {
            categories,
            entries,
            settings,
            selected_category: None,
        }
    }

    /// A fresh journal: built-in categories, default settings, no entries.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::from_parts(seed::default_categories(now), Vec::new(), AppSettings::default())
    }

    /// Applies `command` and reports whether anything changed.
    pub fn apply(&mut self, command: &Command) -> Applied {
        match command {
            Command::AddCategory {
                timestamp,
                category_id,
                data,
            } => {
                self.categories
                    .push(Category::from_new(category_id.clone(), data.clone(), *timestamp));
                Applied::Changed
            }
            Command::UpdateCategory {
                timestamp,
                category_id,
                patch,
            } => match self.category_mut(category_id) {
                Some(category) => {
                    category.apply_patch(patch, *timestamp);
                    Applied::Changed
                }
                None => Applied::Unchanged,
            },
            Command::DeleteCategory { category_id, .. } => self.delete_category(category_id),
            Command::SelectCategory { category_id, .. } => {
                if self.selected_category == *category_id {
                    return Applied::Unchanged;
                }
                self.selected_category = category_id.clone();
                Applied::Changed
            }
            Command::AddEntry {
                timestamp,
                entry_id,
                data,
            } => {
                match self.category_mut(&data.category_id) {
                    Some(category) => category.increment_count(*timestamp),
                    None => log::warn!(
                        "entry {} references unknown category {}",
                        entry_id,
                        data.category_id
                    ),
                }
                self.entries
                    .push(JournalEntry::from_new(entry_id.clone(), data.clone(), *timestamp));
                Applied::Changed
            }
            Command::UpdateEntry {
                timestamp,
                entry_id,
                patch,
            } => match self.entries.iter_mut().find(|e| e.id == *entry_id) {
                Some(entry) => {
                    entry.apply_patch(patch, *timestamp);
                    Applied::Changed
                }
                None => Applied::Unchanged,
            },
            Command::DeleteEntry {
                timestamp,
                entry_id,
            } => {
                let Some(index) = self.entries.iter().position(|e| e.id == *entry_id) else {
                    return Applied::Unchanged;
                };
                let removed = self.entries.remove(index);
                if let Some(category) = self.category_mut(&removed.category_id) {
                    category.decrement_count(*timestamp);
                }
                Applied::Changed
            }
            Command::UpdateSettings { patch, .. } => {
                if self.settings.merge(patch) {
                    Applied::Changed
                } else {
                    Applied::Unchanged
                }
            }
            Command::ResetSettings { .. } => {
                let defaults = AppSettings::default();
                if self.settings == defaults {
                    return Applied::Unchanged;
                }
                self.settings = defaults;
                Applied::Changed
            }
        }
    }

    /// Removes the category and all entries referencing it in one step.
    ///
    /// An id that matches no category is a no-op, even if dangling entries
    /// carry that `category_id`.
    fn delete_category(&mut self, category_id: &str) -> Applied {
        let Some(index) = self.categories.iter().position(|c| c.id == category_id) else {
            return Applied::Unchanged;
        };

        self.categories.remove(index);
        self.entries.retain(|e| e.category_id != category_id);

        if self.selected_category.as_deref() == Some(category_id) {
            self.selected_category = None;
        }
        Applied::Changed
    }

    fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// Looks up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks up an entry by id.
    pub fn entry(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns every entry filed under `category_id`, in insertion order.
    pub fn entries_by_category(&self, category_id: &str) -> Vec<&JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.category_id == category_id)
            .collect()
    }

    /// Returns the ids of categories whose cached `count` disagrees with the
    /// number of entries that reference them.
    pub fn count_mismatches(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.count as usize != self.entries_by_category(&c.id).len())
            .map(|c| c.id.clone())
            .collect()
    }

    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.category(id).is_some() || self.entry(id).is_some()
    }
}
