//! File I/O utilities with atomic writes
//!
//! Every write goes to a sibling temp file first and is renamed into place,
//! so a crash leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CartaError, CartaResult};

/// Read JSON from a file, `None` when the file is absent
pub fn read_json<T, P>(path: P) -> CartaResult<Option<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with `bytes` through a sibling `.tmp` file and a rename
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> CartaResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", path, e))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(storage_error("write", path, e));
    }
    Ok(())
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> CartaError {
    CartaError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Write pretty-printed JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> CartaResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| CartaError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_atomic(path, &bytes)
}
