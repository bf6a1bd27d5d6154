//! Backups of the admin configuration
//!
//! A backup is any system export found in the export directory (see
//! [`crate::export`]).
//!
//! - `BackupManager`: lists exported backups and applies the retention count
//! - `restore_from_file`: reads an archive, JSON or YAML export back into a store
//!
//! # Example
//!
//! ```rust,ignore
//! let manager = BackupManager::new(settings.export_dir(&paths), settings.export.retention);
//! manager.enforce_retention()?;
//!
//! let result = restore_from_file(&mut store, &path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{load_backup, restore_from_file, LoadedBackup, RestoreResult};
