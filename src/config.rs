use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TASKNOTE_DATA_DIR";
/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "TASKNOTE_LOG";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON file per store key.
    pub data_dir: PathBuf,
    /// Log level spec passed to the logger (e.g. `info`, `debug`).
    pub log_level: String,
}

impl Config {
    /// Resolves settings from an optional command-line override and the environment.
    ///
    /// The data directory is determined in the following order:
    /// 1. `data_dir_override` (the `--data-dir` flag).
    /// 2. `TASKNOTE_DATA_DIR` environment variable.
    /// 3. `~/.local/share/tasknote` (on Linux).
    /// 4. `./tasknote` (fallback).
    pub fn resolve(data_dir_override: Option<PathBuf>) -> Config {
        let data_dir = data_dir_override
            .or_else(|| std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Config { data_dir, log_level }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn default_data_dir() -> PathBuf {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("tasknote");
    p
}
