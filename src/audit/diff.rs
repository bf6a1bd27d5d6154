//! Change descriptions for update notifications
//!
//! Compares the serialized form of an entity before and after an update and
//! renders the top-level fields that changed, e.g.
//! `cost: 100 -> 150, active: true -> false`.

use serde::Serialize;
use serde_json::Value;

/// Fields that change on every update and carry no information
const IGNORED_FIELDS: [&str; 2] = ["updatedAt", "createdAt"];

/// Longest string value rendered before truncation, in characters
const MAX_STRING_CHARS: usize = 40;

/// Describe what changed between two versions of an entity
///
/// Returns `None` when nothing but timestamps changed.
pub fn describe_changes<T: Serialize>(before: &T, after: &T) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;
    generate_diff(&before, &after)
}

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields are compared; nested values are summarized.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_field_change() {
        let before = json!({"name": "Alameda", "cost": 100});
        let after = json!({"name": "Alameda", "cost": 150});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "cost: 100 -> 150");
    }

    #[test]
    fn test_timestamps_ignored() {
        let before = json!({"cost": 100, "updatedAt": "2024-01-01T00:00:00Z"});
        let after = json!({"cost": 100, "updatedAt": "2024-01-02T00:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"titulo": "Teresa", "descripcion": "old"});
        let after = json!({"titulo": "Teresa", "active": false});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("descripcion: \"old\" -> (removed)"));
        assert!(diff.contains("active: (added) -> false"));
    }

    #[test]
    fn test_long_multibyte_string_truncation() {
        let before = json!({"descripcion": "ñ".repeat(100)});
        let after = json!({"descripcion": "corta"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_describe_changes_on_structs() {
        #[derive(Serialize)]
        struct Zone {
            name: &'static str,
            active: bool,
        }

        let diff = describe_changes(
            &Zone { name: "Quintero", active: true },
            &Zone { name: "Quintero", active: false },
        );
        assert_eq!(diff.as_deref(), Some("active: true -> false"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(12.5)), "12.5");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
