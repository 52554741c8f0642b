//! The application state store: journal state plus write-through persistence.

use crate::{
    Applied, AppSettings, Category, CategoryPatch, Command, EntryPatch, JournalEntry,
    JournalState, KeyValueStore, NewCategory, NewEntry, Result, SettingsPatch, Snapshot,
    STORAGE_KEY,
};
use chrono::Utc;
use uuid::Uuid;

/// How a [`JournalStore`] obtained its initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// A valid snapshot was found in storage.
    Restored,
    /// Storage held no snapshot; built-in defaults were seeded.
    Seeded,
    /// Reading or decoding the snapshot failed; defaults were seeded instead.
    Recovered(String),
    /// The caller supplied the state; storage was not read.
    Provided,
}

/// Single source of truth for categories, entries and settings.
///
/// Every mutation is turned into a [`Command`], applied to the in-memory
/// [`JournalState`], and, if it changed persisted data, followed by a write
/// of the full [`Snapshot`] to storage. The in-memory state is authoritative:
/// a failed write is logged and left for the next mutation to overwrite.
///
/// Mutations take `&mut self`, so there is exactly one writer at a time. A
/// host that shares the store across threads wraps it in `Arc<Mutex<_>>`,
/// which keeps mutate-then-persist inside one critical section.
pub struct JournalStore<S: KeyValueStore> {
    storage: S,
    state: JournalState,
    hydration: Hydration,
}

impl<S: KeyValueStore> JournalStore<S> {
    /// Hydrates a store from `storage`, falling back to defaults.
    ///
    /// Never fails: a missing snapshot seeds the built-in categories and
    /// default settings, and a storage or decode failure does the same after
    /// logging a warning. [`hydration`](Self::hydration) reports which path
    /// was taken.
    pub fn open(storage: S) -> Self {
        let (state, hydration) = match storage.get(STORAGE_KEY) {
            Ok(Some(blob)) => match Snapshot::decode(&blob) {
                Ok(snapshot) => (snapshot.into_state(), Hydration::Restored),
                Err(e) => {
                    log::warn!("discarding unreadable journal snapshot: {e}");
                    (JournalState::seeded(Utc::now()), Hydration::Recovered(e.to_string()))
                }
            },
            Ok(None) => (JournalState::seeded(Utc::now()), Hydration::Seeded),
            Err(e) => {
                log::warn!("failed to read journal snapshot: {e}");
                (JournalState::seeded(Utc::now()), Hydration::Recovered(e.to_string()))
            }
        };

        log::info!(
            "journal hydrated ({:?}): {} categories, {} entries",
            hydration,
            state.categories().len(),
            state.entries().len()
        );
        let mismatches = state.count_mismatches();
        if !mismatches.is_empty() {
            log::debug!("category counts out of step with entries: {mismatches:?}");
        }

        Self {
            storage,
            state,
            hydration,
        }
    }

    /// Wraps an explicit state without reading storage. Nothing is written
    /// until the first mutation or [`flush`](Self::flush).
    pub fn with_state(storage: S, state: JournalState) -> Self {
        Self {
            storage,
            state,
            hydration: Hydration::Provided,
        }
    }

    // ── Categories ────────────────────────────────────────────────

    /// Creates a category with a fresh id and returns it.
    pub fn add_category(&mut self, data: NewCategory) -> Category {
        let now = Utc::now();
        let category_id = self.fresh_id();
        let category = Category::from_new(category_id.clone(), data.clone(), now);
        self.dispatch(Command::AddCategory {
            timestamp: now,
            category_id,
            data,
        });
        category
    }

    /// Merges `patch` into the category. Unknown ids are ignored.
    pub fn update_category(&mut self, category_id: &str, patch: CategoryPatch) {
        self.dispatch(Command::UpdateCategory {
            timestamp: Utc::now(),
            category_id: category_id.to_string(),
            patch,
        });
    }

    /// Deletes the category and every entry filed under it.
    ///
    /// Built-in categories are not protected here; callers check
    /// [`is_protected_category`](crate::is_protected_category) first.
    pub fn delete_category(&mut self, category_id: &str) {
        self.dispatch(Command::DeleteCategory {
            timestamp: Utc::now(),
            category_id: category_id.to_string(),
        });
    }

    /// Sets or clears the transient selected-category pointer.
    pub fn select_category(&mut self, category_id: Option<&str>) {
        self.dispatch(Command::SelectCategory {
            timestamp: Utc::now(),
            category_id: category_id.map(str::to_string),
        });
    }

    // ── Entries ───────────────────────────────────────────────────

    /// Creates an entry, bumps its category's count, and returns the new id.
    ///
    /// An unknown `category_id` is accepted; the entry then counts towards
    /// no category.
    pub fn add_entry(&mut self, data: NewEntry) -> String {
        let entry_id = self.fresh_id();
        self.dispatch(Command::AddEntry {
            timestamp: Utc::now(),
            entry_id: entry_id.clone(),
            data,
        });
        entry_id
    }

    /// Merges `patch` into the entry. Unknown ids are ignored.
    ///
    /// Category counts are left alone even when `category_id` changes.
    pub fn update_entry(&mut self, entry_id: &str, patch: EntryPatch) {
        self.dispatch(Command::UpdateEntry {
            timestamp: Utc::now(),
            entry_id: entry_id.to_string(),
            patch,
        });
    }

    /// Deletes the entry and decrements its category's count (never below zero).
    pub fn delete_entry(&mut self, entry_id: &str) {
        self.dispatch(Command::DeleteEntry {
            timestamp: Utc::now(),
            entry_id: entry_id.to_string(),
        });
    }

    // ── Settings ──────────────────────────────────────────────────

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.dispatch(Command::UpdateSettings {
            timestamp: Utc::now(),
            patch,
        });
    }

    pub fn reset_settings(&mut self) {
        self.dispatch(Command::ResetSettings {
            timestamp: Utc::now(),
        });
    }

    // ── Queries ───────────────────────────────────────────────────

    pub fn categories(&self) -> &[Category] {
        self.state.categories()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        self.state.entries()
    }

    pub fn settings(&self) -> &AppSettings {
        self.state.settings()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.state.selected_category()
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.state.category(category_id)
    }

    pub fn entry(&self, entry_id: &str) -> Option<&JournalEntry> {
        self.state.entry(entry_id)
    }

    pub fn entries_by_category(&self, category_id: &str) -> Vec<&JournalEntry> {
        self.state.entries_by_category(category_id)
    }

    pub fn state(&self) -> &JournalState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    /// Writes the current snapshot now, reporting any storage failure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JournalError::Json`] if encoding fails, or whatever
    /// error the storage adapter reports for the write.
    pub fn flush(&mut self) -> Result<()> {
        self.persist()
    }

    /// The single mutation path: apply, then persist if persisted data changed.
    fn dispatch(&mut self, command: Command) -> Applied {
        let applied = self.state.apply(&command);
        log::debug!("{} -> {:?}", command.command_type(), applied);

        if applied == Applied::Changed && command.persists() {
            if let Err(e) = self.persist() {
                log::warn!(
                    "failed to persist journal after {}: {e}",
                    command.command_type()
                );
            }
        }
        applied
    }

    fn persist(&mut self) -> Result<()> {
        let blob = Snapshot::capture(&self.state).encode()?;
        self.storage.set(STORAGE_KEY, &blob)?;
        log::debug!("journal snapshot written ({} bytes)", blob.len());
        Ok(())
    }

    /// Returns a UUID not already used by any live category or entry.
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.state.contains_id(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, FontSize, JournalError, MemoryStore, Mood, SqliteStore};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use tempfile::{NamedTempFile, TempDir};

    /// Storage whose reads and writes can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
        writes: usize,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads {
                return Err(JournalError::InvalidStorage("read refused".to_string()));
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.writes += 1;
            if self.fail_writes {
                return Err(JournalError::InvalidStorage("write refused".to_string()));
            }
            self.inner.set(key, value)
        }
    }

    fn travel() -> NewCategory {
        NewCategory {
            name: "Travel".to_string(),
            icon: "car-outline".to_string(),
            color: "#3B82F6".to_string(),
            count: 0,
        }
    }

    fn entry_in(category_id: &str, title: &str) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            content: "Fun".to_string(),
            category_id: category_id.to_string(),
            image: None,
            mood: None,
            tags: vec![],
        }
    }

    fn blob<S: KeyValueStore>(store: &JournalStore<S>) -> Option<String> {
        store.storage().get(STORAGE_KEY).unwrap()
    }

    #[test]
    fn test_fresh_store_is_seeded() {
        let store = JournalStore::open(MemoryStore::new());

        assert_eq!(store.hydration(), &Hydration::Seeded);
        assert_eq!(store.categories().len(), 7);
        assert!(store.entries().is_empty());
        assert_eq!(store.settings(), &AppSettings::default());
        assert!(blob(&store).is_none());
    }

    #[test]
    fn test_travel_scenario() {
        let mut store = JournalStore::open(MemoryStore::new());

        let category = store.add_category(travel());
        assert_eq!(category.count, 0);
        assert_eq!(store.category(&category.id), Some(&category));

        let entry_id = store.add_entry(entry_in(&category.id, "Trip"));
        assert_eq!(store.entry(&entry_id).unwrap().title, "Trip");
        assert_eq!(store.category(&category.id).unwrap().count, 1);

        store.delete_category(&category.id);
        assert!(store.category(&category.id).is_none());
        assert!(store.entry(&entry_id).is_none());
        assert!(store.entries_by_category(&category.id).is_empty());
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let mut store = JournalStore::open(MemoryStore::new());
        let entry_id = store.add_entry(entry_in("1", "First"));

        let snapshot = Snapshot::decode(&blob(&store).unwrap()).unwrap();
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.categories[0].count, 1);

        store.update_settings(SettingsPatch {
            font_size: Some(FontSize::Small),
            ..Default::default()
        });
        store.delete_entry(&entry_id);

        let snapshot = Snapshot::decode(&blob(&store).unwrap()).unwrap();
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.categories[0].count, 0);
        assert_eq!(snapshot.settings.font_size, FontSize::Small);
    }

    #[test]
    fn test_restart_restores_everything_but_selection() {
        let mut store = JournalStore::open(MemoryStore::new());
        let cat = store.add_category(travel());
        let entry_id = store.add_entry(NewEntry {
            mood: Some(Mood::Excited),
            image: Some("file:///trip.jpg".to_string()),
            tags: vec!["road".to_string(), "sun".to_string()],
            ..entry_in(&cat.id, "Trip")
        });
        store.update_settings(SettingsPatch {
            is_dark_mode: Some(false),
            ..Default::default()
        });
        store.select_category(Some(&cat.id));

        let reopened = JournalStore::open(store.storage().clone());

        assert_eq!(reopened.hydration(), &Hydration::Restored);
        assert_eq!(reopened.categories(), store.categories());
        assert_eq!(reopened.entries(), store.entries());
        assert_eq!(reopened.settings(), store.settings());
        assert_eq!(reopened.entry(&entry_id).unwrap().tags, vec!["road", "sun"]);
        assert_eq!(store.selected_category(), Some(cat.id.as_str()));
        assert!(reopened.selected_category().is_none());
    }

    #[test]
    fn test_selection_is_not_written() {
        let mut store = JournalStore::open(FlakyStore::default());
        store.select_category(Some("1"));
        store.select_category(None);

        assert_eq!(store.storage().writes, 0);
        assert!(store.selected_category().is_none());
    }

    #[test]
    fn test_unknown_ids_leave_state_and_storage_untouched() {
        let mut store = JournalStore::open(FlakyStore::default());
        store.add_entry(entry_in("2", "Thanks"));
        let state_before = store.state().clone();
        let blob_before = blob(&store);
        let writes_before = store.storage().writes;

        store.update_category("missing", CategoryPatch {
            name: Some("X".to_string()),
            ..Default::default()
        });
        store.delete_category("missing");
        store.update_entry("missing", EntryPatch {
            title: Some("X".to_string()),
            ..Default::default()
        });
        store.delete_entry("missing");

        assert_eq!(store.state(), &state_before);
        assert_eq!(blob(&store), blob_before);
        assert_eq!(store.storage().writes, writes_before);
    }

    #[test]
    fn test_deleting_unknown_category_spares_dangling_entries() {
        let mut store = JournalStore::open(FlakyStore::default());
        let entry_id = store.add_entry(entry_in("ghost", "Orphan"));
        let state_before = store.state().clone();
        let writes_before = store.storage().writes;

        store.delete_category("ghost");

        assert_eq!(store.state(), &state_before);
        assert!(store.entry(&entry_id).is_some());
        assert_eq!(store.storage().writes, writes_before);
    }

    #[test]
    fn test_with_state_reports_provided() {
        let state = JournalState::seeded(Utc::now());
        let mut store = JournalStore::with_state(MemoryStore::new(), state.clone());

        assert_eq!(store.hydration(), &Hydration::Provided);
        assert_eq!(store.state(), &state);
        assert!(blob(&store).is_none());

        store.flush().unwrap();
        let reopened = JournalStore::open(store.storage().clone());
        assert_eq!(reopened.hydration(), &Hydration::Restored);
        assert_eq!(reopened.categories(), state.categories());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = JournalStore::open(MemoryStore::new());
        let mut ids = HashSet::new();
        for i in 0..50 {
            let cat = store.add_category(NewCategory {
                name: format!("Cat {i}"),
                ..travel()
            });
            let entry_id = store.add_entry(entry_in(&cat.id, "x"));
            assert!(ids.insert(cat.id));
            assert!(ids.insert(entry_id));
        }
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_defaults() {
        let mut storage = MemoryStore::new();
        storage.set(STORAGE_KEY, "{\"categories\": [oops").unwrap();

        let store = JournalStore::open(storage);
        assert!(matches!(store.hydration(), Hydration::Recovered(_)));
        assert_eq!(store.categories().len(), 7);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_read_failure_falls_back_to_defaults() {
        let store = JournalStore::open(FlakyStore {
            fail_reads: true,
            ..Default::default()
        });
        match store.hydration() {
            Hydration::Recovered(msg) => assert!(msg.contains("read refused")),
            other => panic!("unexpected hydration: {other:?}"),
        }
        assert_eq!(store.categories().len(), 7);
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let mut store = JournalStore::open(FlakyStore {
            fail_writes: true,
            ..Default::default()
        });
        let entry_id = store.add_entry(entry_in("3", "Goal"));

        assert!(store.entry(&entry_id).is_some());
        assert_eq!(store.category("3").unwrap().count, 1);
        assert_eq!(store.storage().writes, 1);
        assert!(store.flush().is_err());
    }

    #[test]
    fn test_flush_writes_seeded_defaults() {
        let mut store = JournalStore::open(MemoryStore::new());
        store.flush().unwrap();

        let snapshot = Snapshot::decode(&blob(&store).unwrap()).unwrap();
        assert_eq!(snapshot.categories.len(), 7);
    }

    #[test]
    fn test_sqlite_backed_restart() {
        let temp = NamedTempFile::new().unwrap();
        let entry_id = {
            let mut store = JournalStore::open(SqliteStore::create(temp.path()).unwrap());
            store.add_entry(entry_in("4", "Hard day"))
        };

        let store = JournalStore::open(SqliteStore::open(temp.path()).unwrap());
        assert_eq!(store.hydration(), &Hydration::Restored);
        assert_eq!(store.entry(&entry_id).unwrap().title, "Hard day");
        assert_eq!(store.category("4").unwrap().count, 1);
    }

    #[test]
    fn test_file_backed_restart() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = JournalStore::open(FileStore::new(dir.path()));
            store.reset_settings();
            store.update_settings(SettingsPatch {
                reminder_time: Some("06:45".to_string()),
                ..Default::default()
            });
        }

        let store = JournalStore::open(FileStore::new(dir.path()));
        assert_eq!(store.settings().reminder_time, "06:45");
    }

    #[test]
    fn test_shared_store_keeps_counts_under_threads() {
        let store = Arc::new(Mutex::new(JournalStore::open(MemoryStore::new())));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let mut guard = store.lock().unwrap();
                        let id = guard.add_entry(entry_in("5", &format!("t{t}-{i}")));
                        if i % 5 == 0 {
                            guard.delete_entry(&id);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = store.lock().unwrap();
        assert_eq!(store.entries().len(), 80);
        assert_eq!(store.category("5").unwrap().count, 80);
        assert!(store.state().count_mismatches().is_empty());
    }
}
