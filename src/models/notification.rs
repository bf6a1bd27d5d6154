//! Admin notifications
//!
//! Every admin command leaves exactly one notification behind. The log is
//! bounded: it keeps the newest [`NOTIFICATION_CAPACITY`] entries, newest
//! first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::ids::NotificationId;

/// Maximum number of notifications kept in the log
pub const NOTIFICATION_CAPACITY: usize = 50;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Admin section a notification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Authentication")]
    Authentication,
    #[serde(rename = "Price Control")]
    Prices,
    #[serde(rename = "Delivery Zones")]
    Zones,
    #[serde(rename = "Novela Catalog")]
    Novelas,
    #[serde(rename = "Notifications")]
    Notifications,
    #[serde(rename = "System")]
    System,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication",
            Self::Prices => "Price Control",
            Self::Zones => "Delivery Zones",
            Self::Novelas => "Novela Catalog",
            Self::Notifications => "Notifications",
            Self::System => "System",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single notification record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub section: Section,

    /// Short name of the command that produced it ("Add Zone", "Login Failed")
    pub action: String,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        section: Section,
        action: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            section,
            action: action.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.kind.to_string().to_uppercase(),
            self.title,
            self.message
        )
    }
}

/// Bounded notification log, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Notification>", into = "Vec<Notification>")]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification to the front, discarding the oldest past capacity
    pub fn push(&mut self, notification: Notification) {
        self.entries.push_front(notification);
        self.entries.truncate(NOTIFICATION_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent notification
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.front()
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// The newest `n` notifications
    pub fn recent(&self, n: usize) -> Vec<Notification> {
        self.entries.iter().take(n).cloned().collect()
    }
}

impl From<Vec<Notification>> for NotificationLog {
    fn from(entries: Vec<Notification>) -> Self {
        let mut entries: VecDeque<Notification> = entries.into();
        entries.truncate(NOTIFICATION_CAPACITY);
        Self { entries }
    }
}

impl From<NotificationLog> for Vec<Notification> {
    fn from(log: NotificationLog) -> Self {
        log.entries.into()
    }
}
