//! Internal domain modules for the Innerverse core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod category;
pub mod command;
pub mod entry;
pub mod error;
pub mod seed;
pub mod settings;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use category::{Category, CategoryPatch, NewCategory};
#[doc(inline)]
pub use command::Command;
#[doc(inline)]
pub use entry::{EntryPatch, JournalEntry, Mood, NewEntry};
#[doc(inline)]
pub use error::{JournalError, Result};
#[doc(inline)]
pub use seed::{default_categories, is_protected_category, PROTECTED_CATEGORY_IDS};
#[doc(inline)]
pub use settings::{AppSettings, FontSize, SettingsPatch};
#[doc(inline)]
pub use snapshot::{Snapshot, STORAGE_KEY};
#[doc(inline)]
pub use state::{Applied, JournalState};
#[doc(inline)]
pub use storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
#[doc(inline)]
pub use store::{Hydration, JournalStore};
