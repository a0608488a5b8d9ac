//! Small persisted key/value store
//!
//! A JSON object on disk, read once at startup and written through on every
//! `set`. Games keep their scalar state here (the snake best score).

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the snake best score is stored.
pub const SNAKE_HIGH_SCORE_KEY: &str = "snakeHighScore";

const STORE_FILE: &str = "store.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl KeyValueStore {
    /// Open the store at `path`. A missing or unreadable file yields an
    /// empty store; the file is created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                tracing::warn!(
                    event = "core.storage.load_failed",
                    path = %path.display(),
                    error = %e,
                    message = "starting with an empty store"
                );
                Map::new()
            }
        };
        Self { path, entries }
    }

    /// Open `store.json` inside `dir`.
    pub fn open_in(dir: &Path) -> Self {
        Self::open(dir.join(STORE_FILE))
    }

    fn read_entries(path: &Path) -> Result<Map<String, Value>> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.to_string(), Value::String(value.into()));
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Best score stored under `key`; absent or malformed values read as zero.
pub fn load_score(store: &KeyValueStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn save_score(store: &mut KeyValueStore, key: &str, score: u32) -> Result<()> {
    store.set(key, score.to_string())
}

/// Per-user data directory for folioOS.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "folio", "folioOS")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Per-user config directory for folioOS.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "folio", "folioOS")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::open_in(dir.path());
        assert_eq!(store.get(SNAKE_HIGH_SCORE_KEY), None);
        assert_eq!(load_score(&store, SNAKE_HIGH_SCORE_KEY), 0);
    }

    #[test]
    fn test_set_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KeyValueStore::open_in(&dir.path().join("nested"));
        save_score(&mut store, SNAKE_HIGH_SCORE_KEY, 120).unwrap();

        let reopened = KeyValueStore::open_in(&dir.path().join("nested"));
        assert_eq!(load_score(&reopened, SNAKE_HIGH_SCORE_KEY), 120);
    }

    #[test]
    fn test_malformed_value_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KeyValueStore::open_in(dir.path());
        store.set(SNAKE_HIGH_SCORE_KEY, "lots").unwrap();
        assert_eq!(load_score(&store, SNAKE_HIGH_SCORE_KEY), 0);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "{not json").unwrap();
        let mut store = KeyValueStore::open_in(dir.path());
        assert_eq!(store.get("anything"), None);
        // And it can still be written.
        store.set("k", "v").unwrap();
        assert_eq!(KeyValueStore::open_in(dir.path()).get("k"), Some("v"));
    }
}
