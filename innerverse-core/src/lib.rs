//! Core library for Innerverse, a local-first personal journal.
//!
//! The primary entry point is [`JournalStore`], which owns the categories,
//! entries and settings of one journal and writes them through to a
//! [`KeyValueStore`] after every change. All mutations go through
//! `JournalStore` methods; the pure transition logic lives in
//! [`JournalState::apply`].
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    category::{Category, CategoryPatch, NewCategory},
    command::Command,
    entry::{EntryPatch, JournalEntry, Mood, NewEntry},
    error::{JournalError, Result},
    seed::{default_categories, is_protected_category, PROTECTED_CATEGORY_IDS},
    settings::{AppSettings, FontSize, SettingsPatch},
    snapshot::{Snapshot, STORAGE_KEY},
    state::{Applied, JournalState},
    storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore},
    store::{Hydration, JournalStore},
};
