//! # Tasknote
//!
//! Run without arguments to open the interactive UI:
//!
//! ```bash
//! tasknote
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `a`: Add a task or note
//! *   `e`: Edit the selected entry
//! *   `Space`: Toggle the selected task
//! *   `d`: Delete the selected entry
//! *   `f`: Cycle the task filter (all / active / completed)
//! *   `v` / `Tab`: Switch between tasks and notes
//! *   `L`: Switch language (FR / EN)
//! *   `q`: Quit
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! tasknote add "Buy milk"
//! tasknote list --filter active
//! tasknote toggle 3f2a91c0
//! tasknote note add "Call the plumber on Monday"
//! tasknote lang toggle
//! ```
//!
//! Ids may be abbreviated to any unique prefix; listings show the first
//! eight characters.
//!
//! ## Data Storage
//!
//! Data is saved under your local data directory (`~/.local/share/tasknote`
//! on Linux). Override it with `--data-dir` or the `TASKNOTE_DATA_DIR`
//! environment variable. Logs are written to the `logs` subdirectory; set
//! `TASKNOTE_LOG` to change the level.

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use tasknote::commands::*;
use tasknote::config::Config;
use tasknote::logging::init_logging;
use tasknote::models::FilterType;
use tasknote::state::AppState;
use tasknote::storage::FileStore;
use tasknote::tui::run_tui;

#[derive(Parser)]
#[command(name = "tasknote")]
#[command(about = "Bilingual task and notes manager", long_about = None)]
struct Cli {
    /// Directory holding the data files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for FilterType {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => FilterType::All,
            FilterArg::Active => FilterType::Active,
            FilterArg::Completed => FilterType::Completed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text (quoted if it has spaces)
        text: String,
    },
    /// List tasks
    List {
        /// Which tasks to show
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Toggle a task between active and completed
    Toggle {
        id: String,
    },
    /// Replace the text of a task
    Edit {
        id: String,
        text: String,
    },
    /// Remove a task
    Rm {
        id: String,
    },
    /// Manage notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Show or switch the display language
    Lang {
        #[command(subcommand)]
        command: Option<LangCommands>,
    },
    /// Delete all tasks, notes and settings
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Add a new note
    Add {
        text: String,
    },
    /// List notes
    List,
    /// Replace the text of a note
    Edit {
        id: String,
        text: String,
    },
    /// Remove a note
    Rm {
        id: String,
    },
}

#[derive(Subcommand)]
enum LangCommands {
    /// Switch between French and English
    Toggle,
}

fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "tasknote", &mut io::stdout());
        return;
    }

    let config = Config::resolve(cli.data_dir);
    if let Err(e) = init_logging(&config.log_level, &config.log_dir()) {
        eprintln!("Logging disabled: {}", e);
    }

    let mut state = AppState::load(FileStore::new(&config.data_dir));

    match cli.command {
        Some(Commands::Add { text }) => cmd_add(&mut state, &text, false),
        Some(Commands::List { filter }) => cmd_list(&mut state, filter.into()),
        Some(Commands::Toggle { id }) => cmd_toggle(&mut state, &id, false),
        Some(Commands::Edit { id, text }) => cmd_edit(&mut state, &id, &text, false),
        Some(Commands::Rm { id }) => cmd_remove(&mut state, &id, false),
        Some(Commands::Note { command }) => match command {
            NoteCommands::Add { text } => cmd_note_add(&mut state, &text, false),
            NoteCommands::List => cmd_note_list(&state),
            NoteCommands::Edit { id, text } => cmd_note_edit(&mut state, &id, &text, false),
            NoteCommands::Rm { id } => cmd_note_remove(&mut state, &id, false),
        },
        Some(Commands::Lang { command }) => cmd_lang(&mut state, command.is_some(), false),
        Some(Commands::Reset { force }) => cmd_reset(&mut state, force),
        Some(Commands::Completions { .. }) => {}
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui(state) {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
