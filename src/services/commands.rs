//! Admin commands
//!
//! The closed set of operations that may change the admin state. Each one
//! carries a typed payload and is matched exhaustively by the store.

use chrono::{DateTime, Utc};

use crate::crypto::SecureString;
use crate::models::{NewNovela, NewZone, NovelaId, NovelaUpdate, PriceConfig, ZoneId, ZoneUpdate};
use crate::storage::PersistedSnapshot;

/// A state-changing admin command
#[derive(Debug, Clone)]
pub enum AdminCommand {
    Login {
        username: String,
        password: SecureString,
    },
    Logout,
    SetPrices(PriceConfig),
    AddZone(NewZone),
    UpdateZone(ZoneUpdate),
    RemoveZone(ZoneId),
    AddNovela(NewNovela),
    UpdateNovela(NovelaUpdate),
    RemoveNovela(NovelaId),
    ClearNotifications,
    /// An export finished; `documents` lists the generated file names
    RecordBackup {
        at: DateTime<Utc>,
        documents: Vec<String>,
    },
    /// Merge a persisted snapshot over the current state
    Restore(PersistedSnapshot),
}

impl AdminCommand {
    /// Short command name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::SetPrices(_) => "set_prices",
            Self::AddZone(_) => "add_zone",
            Self::UpdateZone(_) => "update_zone",
            Self::RemoveZone(_) => "remove_zone",
            Self::AddNovela(_) => "add_novela",
            Self::UpdateNovela(_) => "update_novela",
            Self::RemoveNovela(_) => "remove_novela",
            Self::ClearNotifications => "clear_notifications",
            Self::RecordBackup { .. } => "record_backup",
            Self::Restore(_) => "restore",
        }
    }
}

/// What a command did to the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The state changed as requested
    Applied,
    /// The command referred to an id that does not exist; nothing changed
    Missing,
    /// The payload failed validation; nothing changed
    Rejected(String),
    /// Wrong credentials
    Denied,
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
