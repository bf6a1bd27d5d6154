//! Settings for the admin tool
//!
//! Admin credentials, export destination and retention, and the audit
//! toggle. Unknown or missing fields fall back to their defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::CartaPaths;
use crate::error::{CartaError, CartaResult};

/// Default admin username
pub const DEFAULT_ADMIN_USERNAME: &str = "root";

/// Currency printed in generated documents
pub const DEFAULT_CURRENCY: &str = "CUP";

/// Admin credential settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default = "default_username")]
    pub username: String,

    /// Argon2id PHC string; when absent the built-in default password applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            username: default_username(),
            password_hash: None,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Where archives are written; the exports dir under the base dir if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Number of exported artifacts kept by `backup prune`
    #[serde(default = "default_retention")]
    pub retention: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: None,
            retention: default_retention(),
        }
    }
}

/// Settings file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO code shown next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub admin: AdminSettings,

    #[serde(default)]
    pub export: ExportSettings,

    /// Mirror notifications into the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_username() -> String {
    DEFAULT_ADMIN_USERNAME.to_string()
}

fn default_retention() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            admin: AdminSettings::default(),
            export: ExportSettings::default(),
            audit_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &CartaPaths) -> CartaResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CartaError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| CartaError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CartaPaths) -> CartaResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CartaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CartaError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Directory exported artifacts are written to
    pub fn export_dir(&self, paths: &CartaPaths) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| paths.exports_dir())
    }
}
