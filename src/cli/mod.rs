//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod admin;
pub mod backup;
pub mod cart;
pub mod export;
pub mod novela;
pub mod prices;
pub mod zone;

pub use admin::{handle_admin_command, handle_log_command, AdminCommands};
pub use backup::{handle_backup_command, BackupCommands};
pub use cart::{handle_cart_command, CartCommands};
pub use export::{handle_export_command, ExportFormat};
pub use novela::{handle_novela_command, NovelaCommands};
pub use prices::{handle_prices_command, PricesCommands};
pub use zone::{handle_zone_command, ZoneCommands};

use crate::audit::AuditLogger;
use crate::config::{CartaPaths, Settings};
use crate::crypto::SecureString;
use crate::error::{CartaError, CartaResult};
use crate::services::{Authenticator, ConfigStore};
use crate::storage::FileStorage;

/// Admin credentials given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<SecureString>,
}

/// Everything a command handler needs
pub struct CliContext {
    pub paths: CartaPaths,
    pub settings: Settings,
    pub credentials: Credentials,
}

impl CliContext {
    pub fn new(paths: CartaPaths, settings: Settings, credentials: Credentials) -> Self {
        Self {
            paths,
            settings,
            credentials,
        }
    }

    /// File storage under the data directory
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.paths.data_dir())
    }

    /// Open the config store over the data directory
    pub fn open_store(&self) -> CartaResult<ConfigStore> {
        let auth = Authenticator::from_settings(&self.settings.admin)?;
        let store = ConfigStore::open(Box::new(self.storage()), auth);

        Ok(if self.settings.audit_enabled {
            store.with_audit(AuditLogger::new(self.paths.audit_log()))
        } else {
            store
        })
    }

    /// Open the store and log in, failing when the credentials are rejected
    pub fn open_admin_store(&self) -> CartaResult<ConfigStore> {
        let mut store = self.open_store()?;
        self.authenticate(&mut store)?;
        Ok(store)
    }

    /// Log in with the given credentials, prompting for a missing password
    pub fn authenticate(&self, store: &mut ConfigStore) -> CartaResult<()> {
        let username = self
            .credentials
            .username
            .clone()
            .unwrap_or_else(|| self.settings.admin.username.clone());

        let password = match &self.credentials.password {
            Some(password) => password.clone(),
            None => prompt_password("Admin password: ")?,
        };

        if store.login(&username, &password) {
            Ok(())
        } else {
            Err(CartaError::Auth("invalid username or password".into()))
        }
    }
}

/// Read a password without echoing it
pub fn prompt_password(prompt: &str) -> CartaResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| CartaError::Auth(format!("Failed to read password: {}", e)))
}
