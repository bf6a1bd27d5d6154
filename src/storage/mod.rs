//! Storage layer for the admin core
//!
//! Snapshots are kept in a small key/value store. The file-backed store
//! writes one JSON file per key with atomic writes; the memory store backs
//! tests.

pub mod file;
pub mod file_io;
pub mod init;
pub mod memory;
pub mod snapshot;

pub use file::FileStorage;
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use init::{default_state, initialize_storage, needs_initialization};
pub use memory::MemoryStorage;
pub use snapshot::{load_snapshot, save_snapshot, PersistedSnapshot, ADMIN_DATA_KEY};

use serde_json::Value;

use crate::error::CartaResult;

/// Durable key/value storage for JSON snapshots
pub trait SnapshotStorage {
    /// Read the value stored under `key`, `None` if absent
    fn read(&self, key: &str) -> CartaResult<Option<Value>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &Value) -> CartaResult<()>;
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for Box<S> {
    fn read(&self, key: &str) -> CartaResult<Option<Value>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &Value) -> CartaResult<()> {
        (**self).write(key, value)
    }
}
