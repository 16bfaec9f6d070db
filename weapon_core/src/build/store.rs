//! Build persistence over a small key-value store

use super::Build;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};

/// Key holding the list of named builds
pub const SAVED_KEY: &str = "sulfur_saved_configs";
/// Key holding the build being edited
pub const CURRENT_KEY: &str = "sulfur_current_build";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Stored value for {key} is corrupt: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory store: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(io_error(&path))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(&path)(e)),
            _ => Ok(()),
        }
    }
}

/// A named build with its save time (milliseconds since the epoch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuild {
    pub name: String,
    #[serde(flatten)]
    pub build: Build,
    #[serde(default)]
    pub timestamp: u64,
}

/// Saved and current builds on top of a [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct BuildStore<S> {
    store: S,
}

impl<S: KeyValueStore> BuildStore<S> {
    pub fn new(store: S) -> Self {
        BuildStore { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// All saved builds in save order
    pub fn load_saved(&self) -> Result<Vec<SavedBuild>, StoreError> {
        Ok(self.read(SAVED_KEY)?.unwrap_or_default())
    }

    /// Append a named build; earlier builds with the same name are kept
    pub fn save_named(&mut self, name: &str, build: &Build) -> Result<SavedBuild, StoreError> {
        let mut saved = self.load_saved()?;
        let entry = SavedBuild {
            name: name.to_string(),
            build: build.clone(),
            timestamp: now_millis(),
        };
        saved.push(entry.clone());
        self.write(SAVED_KEY, &saved)?;
        debug!(name, count = saved.len(), "saved build");
        Ok(entry)
    }

    /// Remove the saved build at `index`
    pub fn delete_saved(&mut self, index: usize) -> Result<Option<SavedBuild>, StoreError> {
        let mut saved = self.load_saved()?;
        if index >= saved.len() {
            return Ok(None);
        }
        let removed = saved.remove(index);
        self.write(SAVED_KEY, &saved)?;
        Ok(Some(removed))
    }

    /// Remove every saved build called `name`, returning how many went
    pub fn delete_named(&mut self, name: &str) -> Result<usize, StoreError> {
        let mut saved = self.load_saved()?;
        let before = saved.len();
        saved.retain(|s| s.name != name);
        let removed = before - saved.len();
        if removed > 0 {
            self.write(SAVED_KEY, &saved)?;
        }
        Ok(removed)
    }

    /// The most recently saved build called `name`
    pub fn find_named(&self, name: &str) -> Result<Option<SavedBuild>, StoreError> {
        Ok(self
            .load_saved()?
            .into_iter()
            .rev()
            .find(|s| s.name == name))
    }

    pub fn load_current(&self) -> Result<Option<Build>, StoreError> {
        self.read(CURRENT_KEY)
    }

    /// Persist the build being edited; a build without a weapon clears it
    pub fn save_current(&mut self, build: &Build) -> Result<(), StoreError> {
        if build.weapon.is_none() {
            return self.clear_current();
        }
        self.write(CURRENT_KEY, build)
    }

    pub fn clear_current(&mut self) -> Result<(), StoreError> {
        self.store.remove(CURRENT_KEY)
    }

    fn read<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(content) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| {
                warn!(key, "stored value failed to decode");
                StoreError::Decode {
                    key: key.to_string(),
                    source,
                }
            })
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
