//! Bilingual (French/English) message table.
//!
//! Lookups are total: a key missing from the table resolves to the key itself,
//! which makes missing translations visible in the interface.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::Language;

/// One message in both supported languages.
#[derive(Debug, Clone, Copy)]
pub struct Translation {
    pub fr: &'static str,
    pub en: &'static str,
}

impl Translation {
    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::Fr => self.fr,
            Language::En => self.en,
        }
    }
}

const ENTRIES: &[(&str, &str, &str)] = &[
    // Header
    ("appTitle", "Ma Liste de Tâches", "My Task List"),
    ("appSubtitle", "Organisez vos tâches et notes en toute simplicité", "Organize your tasks and notes with ease"),
    ("switchLanguage", "Switch to English", "Passer en français"),
    // Navigation
    ("tasks", "Tâches", "Tasks"),
    ("notes", "Notes", "Notes"),
    // Task form
    ("addTaskPlaceholder", "Ajouter une nouvelle tâche...", "Add a new task..."),
    ("addButton", "Ajouter", "Add"),
    ("editTask", "Modifier la tâche", "Edit task"),
    // Filters
    ("allTasks", "Toutes", "All"),
    ("activeTasks", "Actives", "Active"),
    ("completedTasks", "Terminées", "Completed"),
    // Empty states
    ("noTasks", "Aucune tâche", "No tasks"),
    ("noActiveTasks", "Aucune tâche active", "No active tasks"),
    ("noCompletedTasks", "Aucune tâche terminée", "No completed tasks"),
    ("addFirstTask", "Commencez par ajouter votre première tâche", "Start by adding your first task"),
    ("allTasksCompleted", "Toutes vos tâches sont terminées !", "All your tasks are completed!"),
    ("noTasksCompleted", "Vous n'avez pas encore terminé de tâches", "You haven't completed any tasks yet"),
    // Counter
    ("taskRemaining", "tâche restante", "task remaining"),
    ("tasksRemaining", "tâches restantes", "tasks remaining"),
    // Notes
    ("notesTitle", "Notes", "Notes"),
    ("addNotePlaceholder", "Écrivez votre note...", "Write your note..."),
    ("editNote", "Modifier la note", "Edit note"),
    ("cancel", "Annuler", "Cancel"),
    ("noNotes", "Aucune note pour le moment", "No notes yet"),
    ("addFirstNote", "Appuyez sur a pour ajouter votre première note", "Press a to add your first note"),
    // Tables
    ("columnId", "ID", "ID"),
    ("columnText", "Texte", "Text"),
    ("columnStatus", "Statut", "Status"),
    ("columnCreated", "Créée le", "Created"),
    ("columnUpdated", "Modifiée le", "Updated"),
    ("statusDone", "Terminée", "Done"),
    ("statusPending", "En cours", "Pending"),
    // Confirmations
    ("taskAdded", "Tâche ajoutée", "Task added"),
    ("taskUpdated", "Tâche mise à jour", "Task updated"),
    ("taskDeleted", "Tâche supprimée", "Task deleted"),
    ("noteAdded", "Note ajoutée", "Note added"),
    ("noteUpdated", "Note mise à jour", "Note updated"),
    ("noteDeleted", "Note supprimée", "Note deleted"),
    ("languageChanged", "Langue changée : français", "Language changed: English"),
    ("currentLanguage", "Langue : français", "Language: English"),
    ("emptyText", "Le texte ne peut pas être vide", "Text must not be empty"),
    ("storageUnavailable", "Stockage indisponible, modifications non enregistrées", "Storage unavailable, changes not saved"),
    ("resetConfirm", "Supprimer toutes les tâches et notes ? Action irréversible. [y/N] ", "Delete all tasks and notes? This cannot be undone. [y/N] "),
    ("resetDone", "Données supprimées.", "Data deleted."),
    ("aborted", "Annulé.", "Aborted."),
    // Key hints
    ("hintsTasks", "q: Quitter | a: Ajouter | e: Modifier | Espace: Cocher | d: Suppr | f: Filtre | v: Notes | L: Langue", "q: Quit | a: Add | e: Edit | Space: Toggle | d: Del | f: Filter | v: Notes | L: Language"),
    ("hintsNotes", "q: Quitter | a: Ajouter | e: Modifier | d: Suppr | v: Tâches | L: Langue", "q: Quit | a: Add | e: Edit | d: Del | v: Tasks | L: Language"),
    ("hintsInput", "Entrée: Valider | Échap: Annuler", "Enter: Save | Esc: Cancel"),
];

static TRANSLATIONS: Lazy<HashMap<&'static str, Translation>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|&(key, fr, en)| (key, Translation { fr, en }))
        .collect()
});

/// Resolves `key` in `lang`, or returns `key` unchanged when it is not in the table.
pub fn resolve<'a>(key: &'a str, lang: Language) -> &'a str {
    match TRANSLATIONS.get(key) {
        Some(entry) => entry.get(lang),
        None => key,
    }
}

/// Returns the other supported language.
pub fn toggle(lang: Language) -> Language {
    match lang {
        Language::Fr => Language::En,
        Language::En => Language::Fr,
    }
}

/// "N task(s) remaining" with the singular form for exactly one.
pub fn remaining(count: usize, lang: Language) -> String {
    let key = if count == 1 { "taskRemaining" } else { "tasksRemaining" };
    format!("{} {}", count, resolve(key, lang))
}

/// Every key in the table, in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|&(key, _, _)| key)
}
