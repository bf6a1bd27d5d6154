//! Audit trail for admin changes
//!
//! - `AuditLogger`: mirrors every notification into an append-only JSONL
//!   file so the history outlives the bounded in-state log.
//! - `describe_changes` / `generate_diff`: render the field changes an
//!   update made, for the update notification message.
//!
//! # Example
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! let store = ConfigStore::open(storage, auth).with_audit(logger);
//! ```

mod diff;
mod logger;

pub use diff::{describe_changes, generate_diff};
pub use logger::AuditLogger;
