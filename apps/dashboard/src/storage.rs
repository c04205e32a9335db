//! Small persistent key-value store backed by one JSON file.
//!
//! Holds the theme preference and the captured session token between runs.
//! Every write rewrites the whole file.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Bearer token captured at login, so separate invocations stay signed in.
pub const SESSION_TOKEN_KEY: &str = "session-token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Storage {
    /// Loads the file at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(raw) if raw.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(raw) => serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        debug!("Opened storage {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    /// Returns whether the key was present.
    pub fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.flush()?;
        }
        Ok(existed)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let body =
            serde_json::to_vec_pretty(&self.entries).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, body).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().join("state.json")).unwrap();
        assert_eq!(storage.get("vite-ui-theme"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut storage = Storage::open(&path).unwrap();
        storage.set("vite-ui-theme", "light").unwrap();
        storage.set(SESSION_TOKEN_KEY, "tok-1").unwrap();

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.get("vite-ui-theme"), Some("light"));
        assert_eq!(reopened.get(SESSION_TOKEN_KEY), Some("tok-1"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut storage = Storage::open(&path).unwrap();
        storage.set(SESSION_TOKEN_KEY, "tok-1").unwrap();

        assert!(storage.remove(SESSION_TOKEN_KEY).unwrap());
        assert!(!storage.remove(SESSION_TOKEN_KEY).unwrap());
        assert_eq!(Storage::open(&path).unwrap().get(SESSION_TOKEN_KEY), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = Storage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }
}
