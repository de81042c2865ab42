use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Store key holding the ordered task list.
pub const TASKS_KEY: &str = "todo-tasks";
/// Store key holding the ordered note list.
pub const NOTES_KEY: &str = "todo-notes";
/// Store key holding the selected display language.
pub const LANGUAGE_KEY: &str = "todo-language";

/// Durable string key-value storage.
///
/// Implementations overwrite on `set_item` and report `Ok(None)` for keys that
/// were never written.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> FileStore {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut p = self.dir.clone();
        p.push(format!("{}.json", key));
        p
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut f = OpenOptions::new().read(true).open(&path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        Ok(Some(s))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path_for(key))?;
        f.write_all(value.as_bytes())?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-process store. `MemoryStore::unavailable()` builds one that rejects
/// every access, standing in for disabled or full storage; `fail_key`
/// rejects writes and removals of a single key.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    available: bool,
    failing_keys: HashSet<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore { items: HashMap::new(), available: true, failing_keys: HashSet::new() }
    }

    pub fn unavailable() -> MemoryStore {
        MemoryStore { available: false, ..MemoryStore::new() }
    }

    /// Makes writes and removals of `key` fail until `restore_key` is called.
    pub fn fail_key(&mut self, key: &str) {
        self.failing_keys.insert(key.to_string());
    }

    pub fn restore_key(&mut self, key: &str) {
        self.failing_keys.remove(key);
    }

    fn check(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::StorageUnavailable("memory store disabled".into()))
        }
    }

    fn check_key(&self, key: &str) -> Result<()> {
        self.check()?;
        if self.failing_keys.contains(key) {
            Err(Error::StorageUnavailable(format!("key `{}` rejected", key)))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_key(key)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.check_key(key)?;
        self.items.remove(key);
        Ok(())
    }
}

/// Typed JSON view over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PersistentStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub fn new(backend: S) -> PersistentStore<S> {
        PersistentStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `default` if the key is absent, the stored text does not parse
    /// as `T`, or the backend cannot be read.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.get_item(key) {
            Ok(Some(s)) => match serde_json::from_str(&s) {
                Ok(value) => value,
                Err(e) => {
                    warn!("event=store_read module=storage status=malformed key={} error={}", key, e);
                    default
                }
            },
            Ok(None) => {
                debug!("event=store_read module=storage status=absent key={}", key);
                default
            }
            Err(e) => {
                warn!("event=store_read module=storage status=unavailable key={} error={}", key, e);
                default
            }
        }
    }

    /// Serializes `value` and stores it under `key`, replacing any prior value.
    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let s = serde_json::to_string_pretty(value)?;
        self.backend.set_item(key, &s)
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.backend.remove_item(key)
    }
}
