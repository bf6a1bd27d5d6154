//! Audit logger for the append-only notification history
//!
//! The in-state notification log only keeps the newest entries. The audit
//! log keeps every notification ever produced, one JSON object per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{CartaError, CartaResult};
use crate::models::Notification;

/// Appends notifications to a JSONL file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one notification and flush
    pub fn log(&self, notification: &Notification) -> CartaResult<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CartaError::Io(format!("Cannot open audit log: {}", e)))?;

        let mut line = serde_json::to_vec(notification)?;
        line.push(b'\n');
        file.write_all(&line)?;
        file.flush()?;
        Ok(())
    }

    /// Every entry, oldest first; a malformed line fails with its number
    pub fn read_all(&self) -> CartaResult<Vec<Notification>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CartaError::Io(format!("Cannot open audit log: {}", e))),
        };

        BufReader::new(file)
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                Ok(text) if text.trim().is_empty() => None,
                other => Some(parse_line(idx + 1, other)),
            })
            .collect()
    }

    /// The most recent `count` entries, newest first
    pub fn read_recent(&self, count: usize) -> CartaResult<Vec<Notification>> {
        Ok(self.read_all()?.into_iter().rev().take(count).collect())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

fn parse_line(number: usize, line: std::io::Result<String>) -> CartaResult<Notification> {
    let text = line.map_err(|e| CartaError::Io(format!("audit log line {}: {}", number, e)))?;
    serde_json::from_str(&text)
        .map_err(|e| CartaError::Json(format!("audit log line {}: {}", number, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NotificationKind, Section};
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(title: &str) -> Notification {
        Notification::new(
            NotificationKind::Success,
            Section::Zones,
            "Add Zone",
            title,
            "New delivery zone",
            Utc::now(),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.exists());

        logger.log(&entry("Zone Added")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section, Section::Zones);
        assert!(logger.exists());
    }

    #[test]
    fn test_read_recent_newest_first() {
        let (logger, _temp) = create_test_logger();
        for i in 0..5 {
            logger.log(&entry(&format!("#{}", i))).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        let titles: Vec<_> = recent.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["#4", "#3"]);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry("ok")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"{broken\n")
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
