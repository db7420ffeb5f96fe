//! Durable key-value storage for the persisted session.

use crate::error::{ClientError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait CredentialStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes every entry in one step.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Removes every key in one step.
    fn remove_all(&self, keys: &[&str]) -> Result<()>;
}

/// A JSON object of string values in a single file, rewritten atomically on
/// every change.
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read(&self.path).map_err(|err| {
            ClientError::storage(format!("failed to read {}: {err}", self.path.display()))
        })?;
        serde_json::from_slice(&data).map_err(|err| {
            ClientError::storage(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    /// For writes an unreadable file is replaced rather than reported.
    fn read_map_for_update(&self) -> BTreeMap<String, String> {
        self.read_map().unwrap_or_else(|err| {
            tracing::warn!(%err, "replacing unreadable session storage");
            BTreeMap::new()
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(map)
            .map_err(|err| ClientError::storage(err.to_string()))?;

        fs::write(&tmp_path, bytes)?;
        match fs::rename(&tmp_path, &self.path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                if self.path.exists() {
                    fs::remove_file(&self.path)?;
                    fs::rename(&tmp_path, &self.path)?;
                    Ok(())
                } else {
                    Err(rename_err.into())
                }
            }
        }
    }
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let _guard = self.guard.lock();
        let mut map = self.read_map_for_update();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_map(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.guard.lock();
        let (mut map, mut dirty) = match self.read_map() {
            Ok(map) => (map, false),
            Err(err) => {
                tracing::warn!(%err, "replacing unreadable session storage");
                (BTreeMap::new(), true)
            }
        };
        for key in keys {
            dirty |= map.remove(*key).is_some();
        }
        if dirty {
            self.write_map(&map)
        } else {
            Ok(())
        }
    }
}

/// Storage that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let storage = Self::default();
        for (key, value) in entries {
            storage
                .entries
                .lock()
                .insert((*key).to_string(), (*value).to_string());
        }
        storage
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.entries.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialStorage, FileStorage};
    use std::fs;

    #[test]
    fn file_storage_round_trips_values() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let storage = FileStorage::new(dir.path().join("nested").join("session.json"));

        assert_eq!(storage.get("authToken").expect("read"), None);
        storage
            .set_all(&[("authToken", "t1"), ("currentUser", r#"{"username":"kim"}"#)])
            .expect("write should succeed");

        let reopened = FileStorage::new(storage.path().to_path_buf());
        assert_eq!(reopened.get("authToken").expect("read").as_deref(), Some("t1"));
        assert_eq!(
            reopened.get("currentUser").expect("read").as_deref(),
            Some(r#"{"username":"kim"}"#)
        );
        assert!(!storage.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn remove_all_clears_only_named_keys() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage
            .set_all(&[("authToken", "t1"), ("currentUser", "{}"), ("theme", "dark")])
            .expect("write should succeed");

        storage
            .remove_all(&["authToken", "currentUser"])
            .expect("remove should succeed");

        assert_eq!(storage.get("authToken").expect("read"), None);
        assert_eq!(storage.get("currentUser").expect("read"), None);
        assert_eq!(storage.get("theme").expect("read").as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_reported_on_read_and_replaced_on_write() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").expect("fixture should write");
        let storage = FileStorage::new(&path);

        let error = storage.get("authToken").expect_err("corrupt file should fail");
        assert!(error.to_string().contains("failed to parse"));

        storage
            .remove_all(&["authToken", "currentUser"])
            .expect("remove should rewrite the file");
        assert_eq!(storage.get("authToken").expect("read"), None);
    }
}
