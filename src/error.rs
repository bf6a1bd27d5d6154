//! Custom error types for the admin core
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions. Store commands never surface these to
//! their callers; they are used by the storage, export and CLI layers.

use thiserror::Error;

/// Errors raised outside the command path of the config store
#[derive(Error, Debug)]
pub enum CartaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("CSV error: {0}")]
    Csv(String),

    /// Zip creation or reading failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Input that a model refused
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Wrong or unreadable admin credentials
    #[error("Access denied: {0}")]
    Auth(String),

    /// Snapshot persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// No artifact could be delivered
    #[error("Export error: {0}")]
    Export(String),

    /// A backup file that cannot be read back
    #[error("Import error: {0}")]
    Import(String),
}

impl CartaError {
    pub fn zone_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Delivery zone",
            identifier: identifier.into(),
        }
    }

    pub fn novela_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Novela",
            identifier: identifier.into(),
        }
    }
}

impl From<std::io::Error> for CartaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CartaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for CartaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for CartaError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<zip::result::ZipError> for CartaError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Result type alias for carta operations
pub type CartaResult<T> = Result<T, CartaError>;
