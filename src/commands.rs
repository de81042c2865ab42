use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{short_id, FilterType};
use crate::state::AppState;
use crate::storage::KeyValueStore;

fn format_time(t: &DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn report_storage<S: KeyValueStore>(state: &AppState<S>, silent: bool) {
    if let Some(err) = state.storage_error() {
        if !silent { eprintln!("{} ({})", state.translate("storageUnavailable"), err); }
    }
}

fn header<S: KeyValueStore>(state: &AppState<S>, keys: &[&str]) -> Vec<Cell> {
    keys.iter()
        .map(|k| Cell::new(state.translate(k)).add_attribute(Attribute::Bold))
        .collect()
}

/// Adds a new task.
pub fn cmd_add<S: KeyValueStore>(state: &mut AppState<S>, text: &str, silent: bool) {
    match state.add_task(text) {
        Ok(id) => {
            if !silent { println!("{} (id = {})", state.translate("taskAdded"), short_id(&id)); }
            report_storage(state, silent);
        }
        Err(_) => {
            if !silent { eprintln!("{}", state.translate("emptyText")); }
        }
    }
}

/// Flips the completion state of a task.
pub fn cmd_toggle<S: KeyValueStore>(state: &mut AppState<S>, id: &str, silent: bool) {
    let id = match state.resolve_task_id(id) {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    state.toggle_task(id);
    if !silent { println!("{} ({})", state.translate("taskUpdated"), short_id(&id)); }
    report_storage(state, silent);
}

/// Replaces the text of a task.
pub fn cmd_edit<S: KeyValueStore>(state: &mut AppState<S>, id: &str, text: &str, silent: bool) {
    let id = match state.resolve_task_id(id) {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    match state.edit_task(id, text) {
        Ok(_) => {
            if !silent { println!("{} ({})", state.translate("taskUpdated"), short_id(&id)); }
            report_storage(state, silent);
        }
        Err(_) => {
            if !silent { eprintln!("{}", state.translate("emptyText")); }
        }
    }
}

/// Removes a task.
pub fn cmd_remove<S: KeyValueStore>(state: &mut AppState<S>, id: &str, silent: bool) {
    let id = match state.resolve_task_id(id) {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    state.delete_task(id);
    if !silent { println!("{} ({})", state.translate("taskDeleted"), short_id(&id)); }
    report_storage(state, silent);
}

/// Lists tasks matching `filter` in a table, followed by the per-filter counts.
pub fn cmd_list<S: KeyValueStore>(state: &mut AppState<S>, filter: FilterType) {
    state.set_filter(filter);
    let counts = state.task_counts();
    let tasks = state.filtered_tasks();

    if tasks.is_empty() {
        let (title, hint) = state.empty_state_keys();
        println!("{}", state.translate(title));
        println!("{}", state.translate(hint));
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header(state, &["columnId", "columnText", "columnStatus", "columnCreated", "columnUpdated"]));

        for t in tasks {
            let (status, color) = if t.completed {
                (state.translate("statusDone"), Color::Green)
            } else {
                (state.translate("statusPending"), Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(short_id(&t.id)),
                Cell::new(&t.text),
                Cell::new(status).fg(color),
                Cell::new(format_time(&t.created_at)),
                Cell::new(format_time(&t.updated_at)),
            ]);
        }
        println!("{table}");
    }

    let summary: Vec<String> = FilterType::ALL
        .iter()
        .map(|f| {
            let label = state.translate(f.label_key());
            let marker = if *f == filter { "*" } else { "" };
            format!("{}{} ({})", marker, label, counts.for_filter(*f))
        })
        .collect();
    println!("{}", summary.join(" | "));
    if let Some(remaining) = state.remaining_label() {
        println!("{}", remaining);
    }
}

/// Adds a new note.
pub fn cmd_note_add<S: KeyValueStore>(state: &mut AppState<S>, text: &str, silent: bool) {
    match state.add_note(text) {
        Ok(id) => {
            if !silent { println!("{} (id = {})", state.translate("noteAdded"), short_id(&id)); }
            report_storage(state, silent);
        }
        Err(_) => {
            if !silent { eprintln!("{}", state.translate("emptyText")); }
        }
    }
}

/// Replaces the text of a note.
pub fn cmd_note_edit<S: KeyValueStore>(state: &mut AppState<S>, id: &str, text: &str, silent: bool) {
    let id = match state.resolve_note_id(id) {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    match state.edit_note(id, text) {
        Ok(_) => {
            if !silent { println!("{} ({})", state.translate("noteUpdated"), short_id(&id)); }
            report_storage(state, silent);
        }
        Err(_) => {
            if !silent { eprintln!("{}", state.translate("emptyText")); }
        }
    }
}

/// Removes a note.
pub fn cmd_note_remove<S: KeyValueStore>(state: &mut AppState<S>, id: &str, silent: bool) {
    let id = match state.resolve_note_id(id) {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    state.delete_note(id);
    if !silent { println!("{} ({})", state.translate("noteDeleted"), short_id(&id)); }
    report_storage(state, silent);
}

/// Lists all notes, most recent first.
pub fn cmd_note_list<S: KeyValueStore>(state: &AppState<S>) {
    if state.notes().is_empty() {
        println!("{}", state.translate("noNotes"));
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(state, &["columnId", "columnText", "columnUpdated"]));
    for n in state.notes().as_slice() {
        table.add_row(vec![
            Cell::new(short_id(&n.id)),
            Cell::new(&n.text),
            Cell::new(format_time(&n.updated_at)),
        ]);
    }
    println!("{table}");
}

/// Shows the current language, switching it first when `toggle` is set.
pub fn cmd_lang<S: KeyValueStore>(state: &mut AppState<S>, toggle: bool, silent: bool) {
    if toggle {
        state.toggle_language();
        report_storage(state, silent);
    }
    if !silent {
        println!("{} [{}]", state.translate(lang_message_key(toggle)), state.language().code());
        println!("{}", state.translate("switchLanguage"));
    }
}

fn lang_message_key(toggled: bool) -> &'static str {
    if toggled { "languageChanged" } else { "currentLanguage" }
}

/// Deletes all tasks, notes and the language setting.
pub fn cmd_reset<S: KeyValueStore>(state: &mut AppState<S>, force: bool) {
    if !force {
        print!("{}", state.translate("resetConfirm"));
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || input.trim().to_lowercase() != "y" {
            println!("{}", state.translate("aborted"));
            return;
        }
    }

    if let Err(e) = state.reset() {
        eprintln!("{} ({})", state.translate("storageUnavailable"), e);
    } else {
        println!("{}", state.translate("resetDone"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n;
    use crate::models::Language;

    #[test]
    fn lang_reports_change_only_when_toggled() {
        assert_eq!(i18n::resolve(lang_message_key(true), Language::En), "Language changed: English");
        assert_eq!(i18n::resolve(lang_message_key(false), Language::En), "Language: English");
        assert_eq!(i18n::resolve(lang_message_key(false), Language::Fr), "Langue : français");
    }
}
