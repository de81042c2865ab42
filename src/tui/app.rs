use log::warn;
use ratatui::widgets::TableState;
use uuid::Uuid;

use crate::error::Result;
use crate::models::DisplayMode;
use crate::state::AppState;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

/// Terminal front end state: the coordinator plus selection and input buffer.
pub struct App<S: KeyValueStore> {
    pub state: AppState<S>,
    pub task_state: TableState,
    pub note_state: TableState,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub target_id: Option<Uuid>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(state: AppState<S>) -> App<S> {
        let mut app = App {
            state,
            task_state: TableState::default(),
            note_state: TableState::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            target_id: None,
        };
        app.clamp_selection();
        app
    }

    fn visible_len(&self) -> usize {
        match self.state.display_mode() {
            DisplayMode::Tasks => self.state.filtered_tasks().len(),
            DisplayMode::Notes => self.state.notes().len(),
        }
    }

    fn current_table_state(&mut self) -> &mut TableState {
        match self.state.display_mode() {
            DisplayMode::Tasks => &mut self.task_state,
            DisplayMode::Notes => &mut self.note_state,
        }
    }

    /// Keeps the selection inside the visible list after it changes size.
    pub fn clamp_selection(&mut self) {
        let task_len = self.state.filtered_tasks().len();
        let note_len = self.state.notes().len();
        clamp(&mut self.task_state, task_len);
        clamp(&mut self.note_state, note_len);
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 { return; }
        let table = self.current_table_state();
        let i = match table.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        table.select(Some(i));
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 { return; }
        let table = self.current_table_state();
        let i = match table.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        table.select(Some(i));
    }

    pub fn selected_task_id(&self) -> Option<Uuid> {
        let i = self.task_state.selected()?;
        self.state.filtered_tasks().get(i).map(|t| t.id)
    }

    pub fn selected_note_id(&self) -> Option<Uuid> {
        let i = self.note_state.selected()?;
        self.state.notes().as_slice().get(i).map(|n| n.id)
    }

    /// Flips completion of the selected task.
    pub fn toggle_selected(&mut self) {
        if self.state.display_mode() != DisplayMode::Tasks { return; }
        if let Some(id) = self.selected_task_id() {
            self.state.toggle_task(id);
            self.clamp_selection();
        }
    }

    /// Deletes the selected task or note.
    pub fn delete_selected(&mut self) {
        match self.state.display_mode() {
            DisplayMode::Tasks => {
                if let Some(id) = self.selected_task_id() {
                    self.state.delete_task(id);
                }
            }
            DisplayMode::Notes => {
                if let Some(id) = self.selected_note_id() {
                    self.state.delete_note(id);
                }
            }
        }
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        let next = self.state.filter().next();
        self.state.set_filter(next);
        self.clamp_selection();
    }

    /// Switches between the task and note lists.
    pub fn toggle_view(&mut self) {
        self.state.toggle_display_mode();
    }

    pub fn toggle_language(&mut self) {
        self.state.toggle_language();
    }

    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.target_id = None;
        self.input_buffer.clear();
    }

    /// Opens the editor pre-filled with the selected entry's text.
    pub fn start_edit(&mut self) {
        let target = match self.state.display_mode() {
            DisplayMode::Tasks => self
                .selected_task_id()
                .and_then(|id| self.state.tasks().get(id))
                .map(|t| (t.id, t.text.clone())),
            DisplayMode::Notes => self
                .selected_note_id()
                .and_then(|id| self.state.notes().get(id))
                .map(|n| (n.id, n.text.clone())),
        };
        if let Some((id, text)) = target {
            self.target_id = Some(id);
            self.input_mode = InputMode::Editing;
            self.input_buffer = text;
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.target_id = None;
        self.input_buffer.clear();
    }

    /// Submits the input buffer. Whitespace-only input keeps the popup open.
    pub fn handle_input(&mut self) {
        if self.input_buffer.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.input_buffer);
        match (self.input_mode, self.state.display_mode()) {
            (InputMode::Adding, DisplayMode::Tasks) => {
                if self.state.add_task(&text).is_ok() {
                    self.task_state.select(Some(0));
                }
            }
            (InputMode::Adding, DisplayMode::Notes) => {
                if self.state.add_note(&text).is_ok() {
                    self.note_state.select(Some(0));
                }
            }
            (InputMode::Editing, DisplayMode::Tasks) => {
                if let Some(id) = self.target_id {
                    report_edit("task", id, self.state.edit_task(id, &text));
                }
            }
            (InputMode::Editing, DisplayMode::Notes) => {
                if let Some(id) = self.target_id {
                    report_edit("note", id, self.state.edit_note(id, &text));
                }
            }
            (InputMode::Normal, _) => {}
        }
        self.input_mode = InputMode::Normal;
        self.target_id = None;
        self.clamp_selection();
    }
}

fn report_edit(kind: &str, id: Uuid, result: Result<bool>) {
    match result {
        Ok(true) => {}
        Ok(false) => warn!("event=edit module=tui status=missing kind={} id={}", kind, id),
        Err(e) => warn!("event=edit module=tui status=rejected kind={} id={} error={}", kind, id, e),
    }
}

fn clamp(table: &mut TableState, len: usize) {
    if len == 0 {
        table.select(None);
    } else if let Some(i) = table.selected() {
        if i >= len {
            table.select(Some(len - 1));
        }
    } else {
        table.select(Some(0));
    }
}
