//! # Tasknote
//!
//! A bilingual (French/English) personal task and notes manager for the
//! terminal. Tasks can be added, edited, toggled, filtered and deleted; notes
//! are free-form entries without a status. All state lives in a small
//! key-value store, one JSON document per key:
//!
//! *   `todo-tasks`: ordered task list, most recent first.
//! *   `todo-notes`: ordered note list, most recent first.
//! *   `todo-language`: `"fr"` or `"en"`.
//!
//! [`state::AppState`] is the single entry point used by both front ends
//! (the CLI in `commands` and the interactive `tui`).

pub mod commands;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod notes;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod tui;

pub use error::{Error, Result};
pub use state::AppState;
