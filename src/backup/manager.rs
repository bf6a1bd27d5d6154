//! Export listing and retention
//!
//! Exported system snapshots accumulate in the export directory. The
//! manager lists them newest first and prunes everything beyond the
//! configured retention count.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::{CartaError, CartaResult};
use crate::export::{ArtifactKind, ARCHIVE_PREFIX, JSON_PREFIX};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Metadata about an exported backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Export time, taken from the file name
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    #[serde(skip)]
    pub kind: ArtifactKind,
}

/// Lists and prunes exported backups
pub struct BackupManager {
    export_dir: PathBuf,
    retention: usize,
}

impl BackupManager {
    pub fn new(export_dir: PathBuf, retention: usize) -> Self {
        Self {
            export_dir,
            retention,
        }
    }

    /// All backups in the export directory, newest first
    pub fn list_backups(&self) -> CartaResult<Vec<BackupInfo>> {
        if !self.export_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.export_dir).map_err(|e| {
            CartaError::Io(format!("Failed to read export directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                CartaError::Io(format!("Failed to read directory entry: {}", e))
            })?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Delete every backup past the retention count, returning what was removed
    pub fn enforce_retention(&self) -> CartaResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(self.retention) {
            fs::remove_file(&backup.path).map_err(|e| {
                CartaError::Io(format!(
                    "Failed to delete old backup {}: {}",
                    backup.filename, e
                ))
            })?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    pub fn get_latest_backup(&self) -> CartaResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();

    let (kind, stamp) = if let Some(rest) = filename.strip_prefix(ARCHIVE_PREFIX) {
        (ArtifactKind::Archive, rest.strip_suffix(".zip")?)
    } else if let Some(rest) = filename.strip_prefix(JSON_PREFIX) {
        (ArtifactKind::Json, rest.strip_suffix(".json")?)
    } else {
        return None;
    };

    let created_at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .ok()?
        .and_utc();
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename: filename.clone(),
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        kind,
    })
}
