//! Persistent key/value storage for reader preferences

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Data directory, relative to the reader's base directory
pub const DATA_DIR: &str = ".blog-reader";

/// Storage file name inside the data directory
const STORAGE_FILE: &str = "storage.json";

/// A small string key/value store
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// JSON file store, written through on every change
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store in `base_dir`, starting empty if the file is missing
    /// or unreadable
    pub fn open(base_dir: &Path) -> Self {
        let path = base_dir.join(DATA_DIR).join(STORAGE_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt storage file {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        tracing::debug!("Saved {} to {:?}", key, self.path);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path());
        assert_eq!(store.get("theme"), None);

        store.set("theme", "black").unwrap();
        assert!(store.path().exists());

        let reopened = FileStore::open(dir.path());
        assert_eq!(reopened.get("theme").as_deref(), Some("black"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(DATA_DIR)).unwrap();
        fs::write(dir.path().join(DATA_DIR).join(STORAGE_FILE), "not json").unwrap();

        let store = FileStore::open(dir.path());
        assert_eq!(store.get("theme"), None);
    }
}
