//! Application coordinator.
//!
//! `AppState` owns both collections, the current filter, display mode and
//! language. Each user action goes through one of its methods, which applies
//! the collection change and then writes the affected store key. Storage
//! failures are logged and remembered per key until that key is written
//! successfully; they never abort the action and the in-memory state stays
//! authoritative.

use std::collections::BTreeMap;

use log::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::i18n;
use crate::models::{DisplayMode, FilterType, Language, Task, TaskCounts};
use crate::notes::NoteList;
use crate::storage::{KeyValueStore, PersistentStore, LANGUAGE_KEY, NOTES_KEY, TASKS_KEY};
use crate::tasks::TaskList;

pub struct AppState<S: KeyValueStore> {
    store: PersistentStore<S>,
    tasks: TaskList,
    notes: NoteList,
    filter: FilterType,
    display_mode: DisplayMode,
    language: Language,
    failures: BTreeMap<&'static str, String>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Loads tasks, notes and language from `backend`, falling back to empty
    /// collections and French.
    pub fn load(backend: S) -> AppState<S> {
        let store = PersistentStore::new(backend);
        let tasks: TaskList = store.read(TASKS_KEY, TaskList::new());
        let notes: NoteList = store.read(NOTES_KEY, NoteList::new());
        let language = store.read(LANGUAGE_KEY, Language::default());
        info!(
            "event=state_load module=state status=ok tasks={} notes={} language={:?}",
            tasks.len(),
            notes.len(),
            language
        );
        AppState {
            store,
            tasks,
            notes,
            filter: FilterType::default(),
            display_mode: DisplayMode::default(),
            language,
            failures: BTreeMap::new(),
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn notes(&self) -> &NoteList {
        &self.notes
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    /// Failure message for some store key whose latest write or removal
    /// failed, if any. Memory and storage may differ while this is `Some`.
    pub fn storage_error(&self) -> Option<&str> {
        self.failures.values().next().map(String::as_str)
    }

    /// Store keys whose latest write or removal failed.
    pub fn unsaved_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.failures.keys().copied()
    }

    // Tasks

    pub fn add_task(&mut self, text: &str) -> Result<Uuid> {
        let id = self.tasks.add(text)?;
        self.persist_tasks();
        Ok(id)
    }

    pub fn toggle_task(&mut self, id: Uuid) -> bool {
        let changed = self.tasks.toggle(id);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    pub fn edit_task(&mut self, id: Uuid, text: &str) -> Result<bool> {
        let changed = self.tasks.edit(id, text)?;
        if changed {
            self.persist_tasks();
        }
        Ok(changed)
    }

    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let changed = self.tasks.delete(id);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    /// Tasks visible under the current filter.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks.filter(self.filter)
    }

    pub fn task_counts(&self) -> TaskCounts {
        self.tasks.counts()
    }

    // Notes

    pub fn add_note(&mut self, text: &str) -> Result<Uuid> {
        let id = self.notes.add(text)?;
        self.persist_notes();
        Ok(id)
    }

    pub fn edit_note(&mut self, id: Uuid, text: &str) -> Result<bool> {
        let changed = self.notes.edit(id, text)?;
        if changed {
            self.persist_notes();
        }
        Ok(changed)
    }

    pub fn delete_note(&mut self, id: Uuid) -> bool {
        let changed = self.notes.delete(id);
        if changed {
            self.persist_notes();
        }
        changed
    }

    // View state

    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = match self.display_mode {
            DisplayMode::Tasks => DisplayMode::Notes,
            DisplayMode::Notes => DisplayMode::Tasks,
        };
        self.display_mode
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.persist_language();
    }

    /// Switches between French and English and stores the new choice.
    pub fn toggle_language(&mut self) -> Language {
        self.set_language(i18n::toggle(self.language));
        self.language
    }

    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        i18n::resolve(key, self.language)
    }

    /// Title and hint keys shown when the filtered task list is empty.
    pub fn empty_state_keys(&self) -> (&'static str, &'static str) {
        match self.filter {
            FilterType::All => ("noTasks", "addFirstTask"),
            FilterType::Active => ("noActiveTasks", "allTasksCompleted"),
            FilterType::Completed => ("noCompletedTasks", "noTasksCompleted"),
        }
    }

    /// Localized remaining-task counter, or `None` when nothing is active.
    pub fn remaining_label(&self) -> Option<String> {
        let active = self.task_counts().active;
        if active == 0 {
            None
        } else {
            Some(i18n::remaining(active, self.language))
        }
    }

    // Id lookup

    /// Finds the single task whose id starts with `prefix`.
    pub fn resolve_task_id(&self, prefix: &str) -> Result<Uuid> {
        resolve_prefix(self.tasks.as_slice().iter().map(|t| t.id), prefix)
    }

    /// Finds the single note whose id starts with `prefix`.
    pub fn resolve_note_id(&self, prefix: &str) -> Result<Uuid> {
        resolve_prefix(self.notes.as_slice().iter().map(|n| n.id), prefix)
    }

    /// Removes tasks, notes and the language setting from storage.
    ///
    /// Every key is attempted. Only the collections whose key was removed are
    /// cleared in memory, so memory keeps matching what the next load sees.
    /// Returns the first removal error.
    pub fn reset(&mut self) -> Result<()> {
        let mut first_error = None;
        for key in [TASKS_KEY, NOTES_KEY, LANGUAGE_KEY] {
            let result = self.store.remove(key);
            self.record(key, &result);
            match result {
                Ok(()) => match key {
                    TASKS_KEY => self.tasks = TaskList::new(),
                    NOTES_KEY => self.notes = NoteList::new(),
                    _ => self.language = Language::default(),
                },
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                info!("event=state_reset module=state status=ok");
                Ok(())
            }
        }
    }

    fn persist_tasks(&mut self) {
        let result = self.store.write(TASKS_KEY, &self.tasks);
        self.record(TASKS_KEY, &result);
    }

    fn persist_notes(&mut self) {
        let result = self.store.write(NOTES_KEY, &self.notes);
        self.record(NOTES_KEY, &result);
    }

    fn persist_language(&mut self) {
        let result = self.store.write(LANGUAGE_KEY, &self.language);
        self.record(LANGUAGE_KEY, &result);
    }

    fn record(&mut self, key: &'static str, result: &Result<()>) {
        match result {
            Ok(()) => {
                self.failures.remove(key);
            }
            Err(e) => {
                warn!("event=store_write module=state status=failed key={} error={}", key, e);
                self.failures.insert(key, e.to_string());
            }
        }
    }
}

fn resolve_prefix(ids: impl Iterator<Item = Uuid>, prefix: &str) -> Result<Uuid> {
    let needle = prefix.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::UnknownId(prefix.to_string()));
    }
    let mut found = ids.filter(|id| id.to_string().starts_with(&needle));
    match (found.next(), found.next()) {
        (Some(id), None) => Ok(id),
        (Some(_), Some(_)) => Err(Error::AmbiguousId(prefix.to_string())),
        (None, _) => Err(Error::UnknownId(prefix.to_string())),
    }
}
