//! File-backed snapshot storage
//!
//! Each key is kept as `<dir>/<key>.json`.

use std::path::PathBuf;

use serde_json::Value;

use crate::error::{CartaError, CartaResult};

use super::file_io::{read_json, write_json_atomic};
use super::SnapshotStorage;

/// Key/value storage in a directory of JSON files
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> CartaResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CartaError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, key: &str) -> CartaResult<Option<Value>> {
        read_json(self.path_for(key)?)
    }

    fn write(&self, key: &str, value: &Value) -> CartaResult<()> {
        write_json_atomic(self.path_for(key)?, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        let value = json!({"prices": {"moviePrice": 80}, "lastBackup": null});

        storage.write("adminData", &value).unwrap();

        assert!(temp_dir.path().join("adminData.json").exists());
        assert_eq!(storage.read("adminData").unwrap(), Some(value));
    }

    #[test]
    fn test_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        assert_eq!(storage.read("cart").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        assert!(storage.write("../escape", &json!({})).is_err());
        assert!(storage.read("").is_err());
    }
}
