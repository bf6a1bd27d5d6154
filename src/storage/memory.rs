//! In-memory snapshot storage

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{CartaError, CartaResult};

use super::SnapshotStorage;

/// Volatile key/value storage, used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one key
    pub fn with_entry(key: impl Into<String>, value: Value) -> Self {
        let mut data = HashMap::new();
        data.insert(key.into(), value);
        Self {
            data: RwLock::new(data),
        }
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> CartaResult<Option<Value>> {
        let data = self.data.read().map_err(|e| {
            CartaError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> CartaResult<()> {
        let mut data = self.data.write().map_err(|e| {
            CartaError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("adminData").unwrap(), None);

        storage.write("adminData", &json!({"novels": []})).unwrap();
        assert_eq!(
            storage.read("adminData").unwrap(),
            Some(json!({"novels": []}))
        );
    }
}
