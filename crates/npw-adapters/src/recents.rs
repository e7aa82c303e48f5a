//! Recents storage: per-parameter history of previously used values.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use npw_core::application::ports::RecentsStore;

/// Entries kept per key. Matches what a drop-down can usefully show.
const MAX_ENTRIES_PER_KEY: usize = 10;

/// In-memory recents store. Also the building block of the file-backed one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryRecentsStore {
    entries: HashMap<String, Vec<String>>,
}

impl MemoryRecentsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecentsStore for MemoryRecentsStore {
    fn push(&mut self, key: &str, value: &str) {
        let list = self.entries.entry(key.to_owned()).or_default();
        list.retain(|v| v != value);
        list.insert(0, value.to_owned());
        list.truncate(MAX_ENTRIES_PER_KEY);
    }

    fn recent(&self, key: &str) -> Vec<String> {
        self.entries.get(key).cloned().unwrap_or_default()
    }
}

/// Recents store persisted as a JSON file. Load failures are logged and
/// treated as an empty history; losing recents must never block the wizard.
#[derive(Debug)]
pub struct FileRecentsStore {
    path: PathBuf,
    inner: MemoryRecentsStore,
}

impl FileRecentsStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(inner) => inner,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "recents file unreadable, starting fresh");
                    MemoryRecentsStore::new()
                }
            },
            Err(_) => MemoryRecentsStore::new(),
        };
        Self { path, inner }
    }

    /// Write the current history back to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.inner).map_err(std::io::Error::other)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "recents saved");
        Ok(())
    }
}

impl RecentsStore for FileRecentsStore {
    fn push(&mut self, key: &str, value: &str) {
        self.inner.push(key, value);
        if let Err(e) = self.save() {
            warn!(path = %self.path.display(), error = %e, "failed to persist recents");
        }
    }

    fn recent(&self, key: &str) -> Vec<String> {
        self.inner.recent(key)
    }
}
