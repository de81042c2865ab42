use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{next_timestamp, Note};

/// Ordered note collection, most recently added first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct NoteList {
    notes: Vec<Note>,
}

impl NoteList {
    pub fn new() -> NoteList {
        NoteList::default()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn add(&mut self, text: &str) -> Result<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: now,
            updated_at: now,
        };
        let id = note.id;
        self.notes.insert(0, note);
        Ok(id)
    }

    pub fn edit(&mut self, id: Uuid, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.text = text.to_string();
                n.updated_at = next_timestamp(n.updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let len_before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != len_before
    }
}
