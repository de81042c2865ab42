use std::collections::HashSet;

use tasknote::models::{DisplayMode, FilterType, Language, TaskCounts};
use tasknote::state::AppState;
use tasknote::storage::{KeyValueStore, MemoryStore, LANGUAGE_KEY, NOTES_KEY, TASKS_KEY};
use uuid::Uuid;

fn reload(state: AppState<MemoryStore>) -> AppState<MemoryStore> {
    AppState::load(state.store().backend().clone())
}

#[test]
fn test_buy_milk_scenario_persists_each_step() {
    let mut state = AppState::load(MemoryStore::new());
    let id = state.add_task("Buy milk").unwrap();

    let state2 = AppState::load(state.store().backend().clone());
    assert_eq!(state2.tasks().len(), 1);
    assert_eq!(state2.tasks().as_slice()[0].text, "Buy milk");
    assert!(!state2.tasks().as_slice()[0].completed);

    state.toggle_task(id);
    assert!(state.tasks().get(id).unwrap().completed);
    assert_eq!(state.task_counts(), TaskCounts { all: 1, active: 0, completed: 1 });

    state.delete_task(id);
    assert!(state.tasks().is_empty());
    let state = reload(state);
    assert!(state.tasks().is_empty());
}

#[test]
fn test_toggle_language_round_trip_is_persisted() {
    let mut state = AppState::load(MemoryStore::new());
    assert_eq!(state.language(), Language::Fr);

    assert_eq!(state.toggle_language(), Language::En);
    assert_eq!(
        state.store().backend().get_item(LANGUAGE_KEY).unwrap().as_deref(),
        Some("\"en\"")
    );

    assert_eq!(state.toggle_language(), Language::Fr);
    let state = reload(state);
    assert_eq!(state.language(), Language::Fr);
}

#[test]
fn test_notes_added_in_sequence_are_most_recent_first() {
    let mut state = AppState::load(MemoryStore::new());
    state.add_note("A").unwrap();
    state.add_note("B").unwrap();
    let state = reload(state);
    let texts: Vec<&str> = state.notes().as_slice().iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["B", "A"]);
}

#[test]
fn test_round_trip_preserves_timestamps_exactly() {
    let mut state = AppState::load(MemoryStore::new());
    let a = state.add_task("a").unwrap();
    state.add_task("b").unwrap();
    state.toggle_task(a);
    state.edit_task(a, "a, edited").unwrap();
    let n = state.add_note("note").unwrap();
    state.edit_note(n, "note, edited").unwrap();

    let original_tasks = state.tasks().clone();
    let original_notes = state.notes().clone();
    let state = reload(state);

    assert_eq!(state.tasks(), &original_tasks);
    assert_eq!(state.notes(), &original_notes);
    let t = state.tasks().get(a).unwrap();
    assert_eq!(t.updated_at, original_tasks.get(a).unwrap().updated_at);
    assert!(t.updated_at > t.created_at);
}

#[test]
fn test_corrupt_storage_falls_back_to_defaults() {
    let mut backend = MemoryStore::new();
    backend.set_item(TASKS_KEY, "[{\"id\": 42}]").unwrap();
    backend.set_item(NOTES_KEY, "not json at all").unwrap();
    backend.set_item(LANGUAGE_KEY, "\"de\"").unwrap();

    let state = AppState::load(backend);
    assert!(state.tasks().is_empty());
    assert!(state.notes().is_empty());
    assert_eq!(state.language(), Language::Fr);
}

#[test]
fn test_unavailable_storage_never_crashes() {
    let mut state = AppState::load(MemoryStore::unavailable());
    let id = state.add_task("offline").unwrap();
    assert!(state.storage_error().is_some());
    state.toggle_task(id);
    state.toggle_language();
    state.add_note("still here").unwrap();
    assert_eq!(state.tasks().len(), 1);
    assert_eq!(state.language(), Language::En);
}

#[test]
fn test_failed_key_stays_reported_after_other_keys_save() {
    let mut backend = MemoryStore::new();
    backend.fail_key(TASKS_KEY);
    let mut state = AppState::load(backend);

    state.add_task("unsaved").unwrap();
    assert!(state.storage_error().is_some());
    state.toggle_language();
    state.add_note("saved").unwrap();
    assert!(state.storage_error().is_some());
    assert_eq!(state.unsaved_keys().collect::<Vec<_>>(), vec![TASKS_KEY]);

    let state = reload(state);
    assert!(state.tasks().is_empty());
    assert_eq!(state.notes().len(), 1);
    assert_eq!(state.language(), Language::En);
}

#[test]
fn test_unknown_ids_are_silent_no_ops() {
    let mut state = AppState::load(MemoryStore::new());
    state.add_task("keep").unwrap();
    state.add_note("keep").unwrap();
    let missing = Uuid::new_v4();
    assert!(!state.toggle_task(missing));
    assert!(!state.edit_task(missing, "x").unwrap());
    assert!(!state.delete_task(missing));
    assert!(!state.edit_note(missing, "x").unwrap());
    assert!(!state.delete_note(missing));
    assert_eq!(state.tasks().as_slice()[0].text, "keep");
    assert_eq!(state.notes().as_slice()[0].text, "keep");
}

#[test]
fn test_filtered_view_follows_filter_and_partitions_tasks() {
    let mut state = AppState::load(MemoryStore::new());
    let ids: Vec<Uuid> = (0..6).map(|i| state.add_task(&format!("t{}", i)).unwrap()).collect();
    for id in ids.iter().step_by(2) {
        state.toggle_task(*id);
    }

    let all: Vec<Uuid> = state.filtered_tasks().iter().map(|t| t.id).collect();
    let source: Vec<Uuid> = state.tasks().as_slice().iter().map(|t| t.id).collect();
    assert_eq!(all, source);

    state.set_filter(FilterType::Active);
    let active: HashSet<Uuid> = state.filtered_tasks().iter().map(|t| t.id).collect();
    state.set_filter(FilterType::Completed);
    let completed: HashSet<Uuid> = state.filtered_tasks().iter().map(|t| t.id).collect();

    assert_eq!(active.len(), 3);
    assert_eq!(completed.len(), 3);
    assert!(active.is_disjoint(&completed));
    assert_eq!(active.union(&completed).count(), 6);

    let counts = state.task_counts();
    assert_eq!(counts.active + counts.completed, counts.all);
}

#[test]
fn test_filter_and_display_mode_are_not_persisted() {
    let mut state = AppState::load(MemoryStore::new());
    state.set_filter(FilterType::Completed);
    state.set_display_mode(DisplayMode::Notes);
    let state = reload(state);
    assert_eq!(state.filter(), FilterType::All);
    assert_eq!(state.display_mode(), DisplayMode::Tasks);
}

#[test]
fn test_translate_uses_current_language() {
    let mut state = AppState::load(MemoryStore::new());
    assert_eq!(state.translate("tasks"), "Tâches");
    state.toggle_language();
    assert_eq!(state.translate("tasks"), "Tasks");
    assert_eq!(state.translate("notExistingKey123"), "notExistingKey123");
}

#[test]
fn test_reset_clears_memory_and_storage() {
    let mut state = AppState::load(MemoryStore::new());
    state.add_task("t").unwrap();
    state.add_note("n").unwrap();
    state.toggle_language();
    state.reset().unwrap();
    assert!(state.tasks().is_empty());
    assert!(state.storage_error().is_none());
    let state = reload(state);
    assert!(state.tasks().is_empty());
    assert!(state.notes().is_empty());
    assert_eq!(state.language(), Language::Fr);
}

#[test]
fn test_reset_with_failing_key_keeps_that_part() {
    let mut saved = AppState::load(MemoryStore::new());
    saved.add_task("t").unwrap();
    saved.add_note("n").unwrap();
    saved.toggle_language();
    let mut backend = saved.store().backend().clone();
    backend.fail_key(NOTES_KEY);
    let mut state = AppState::load(backend);

    assert!(state.reset().is_err());
    assert!(state.tasks().is_empty());
    assert_eq!(state.notes().len(), 1);
    assert_eq!(state.language(), Language::Fr);
    assert_eq!(state.unsaved_keys().collect::<Vec<_>>(), vec![NOTES_KEY]);

    let state = reload(state);
    assert!(state.tasks().is_empty());
    assert_eq!(state.notes().len(), 1);
    assert_eq!(state.language(), Language::Fr);
}
