//! Notification display formatting

use crate::models::{Notification, NotificationKind};

fn marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "+",
        NotificationKind::Warning => "!",
        NotificationKind::Error => "x",
        NotificationKind::Info => "i",
    }
}

/// Format a notification history, one entry per line
pub fn format_notifications<'a>(notifications: impl IntoIterator<Item = &'a Notification>) -> String {
    let mut output = String::new();

    for notification in notifications {
        output.push_str(&format!(
            "{} [{}] {:<16} {}: {}\n",
            notification.timestamp.format("%Y-%m-%d %H:%M:%S"),
            marker(notification.kind),
            notification.section.label(),
            notification.title,
            notification.message,
        ));
    }

    if output.is_empty() {
        return "No changes recorded.".to_string();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NotificationLog, Section};
    use chrono::Utc;

    #[test]
    fn test_format_line() {
        let n = Notification::new(
            NotificationKind::Warning,
            Section::Zones,
            "Delete Zone",
            "Zone Removed",
            "Zone removed: Vista Alegre",
            Utc::now(),
        );
        let output = format_notifications([&n]);
        assert!(output.contains("[!]"));
        assert!(output.contains("Delivery Zones"));
        assert!(output.contains("Zone Removed: Zone removed: Vista Alegre"));
    }

    #[test]
    fn test_empty() {
        let log = NotificationLog::new();
        assert_eq!(format_notifications(log.iter()), "No changes recorded.");
    }
}
