//! Key-value persistence for journal state
//!
//! Each key holds one opaque blob that is always read and replaced whole.
//! `FileStore` keeps one `<key>.json` file per key; `MemoryStore` backs tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::Result;

/// Storage key for the selected theme name
pub const THEME_KEY: &str = "tradingJournalTheme";

/// Storage key for the serialized research store
pub const RESEARCH_KEY: &str = "tradingResearchData";

/// Whole-blob key-value storage
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the blob stored under `key`, or `None` if nothing was ever saved
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// Store handle shared by every component of one journal session
pub type SharedStore = Rc<dyn KeyValueStore>;

/// File-backed store: one `<key>.json` blob file per key inside `dir`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loaded {} bytes from {:?}", content.len(), path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored data for key '{}'", key);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                Err(e.into())
            }
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write to a sibling temp file and rename so readers never see a partial blob
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, blob)?;
        std::fs::rename(&tmp, &path)?;

        debug!("Saved {} bytes to {:?}", blob.len(), path);
        Ok(())
    }
}

/// In-memory store, used as a fake in tests and for throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before handing the store to a component
    pub fn with_entry(self, key: &str, blob: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        self
    }

    /// Raw blob currently stored under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
