//! The export bundle
//!
//! The machine-readable half of a system export: the admin configuration,
//! the generated documents, recent notifications and a metadata summary.
//! This is what lands in `backup.json` inside the archive, or on its own
//! when the archive cannot be produced.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CartaError, CartaResult};
use crate::models::{AdminState, DeliveryZone, Notification, Novela, PriceConfig};
use crate::storage::PersistedSnapshot;

/// Application name stamped on every bundle
pub const APP_NAME: &str = "TV a la Carta";

/// Bundle format version
pub const BUNDLE_VERSION: &str = "2.1.0";

/// Most notifications carried by a bundle
pub const BUNDLE_NOTIFICATION_LIMIT: usize = 100;

/// Full system export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub app_name: String,
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub admin_config: AdminConfig,

    /// Generated documents keyed by their path inside the archive
    #[serde(alias = "systemFiles")]
    pub documents: BTreeMap<String, String>,

    pub notifications: Vec<Notification>,
    pub metadata: BundleMetadata,
}

/// The configuration part of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig {
    pub prices: PriceConfig,
    pub delivery_zones: Vec<DeliveryZone>,
    pub novels: Vec<Novela>,
}

/// Counts and bookkeeping for a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetadata {
    pub total_zones: usize,
    pub active_zones: usize,
    #[serde(alias = "totalNovels")]
    pub total_novelas: usize,
    #[serde(alias = "activeNovels")]
    pub active_novelas: usize,

    /// The backup before this one
    pub last_backup: Option<DateTime<Utc>>,

    /// Number of generated documents
    pub synced_files: usize,
}

impl ExportBundle {
    /// Assemble a bundle from a state and its generated documents
    pub fn new(
        state: &AdminState,
        documents: BTreeMap<String, String>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        let metadata = BundleMetadata {
            total_zones: state.zones.len(),
            active_zones: state.active_zone_count(),
            total_novelas: state.novelas.len(),
            active_novelas: state.active_novela_count(),
            last_backup: state.last_backup,
            synced_files: documents.len(),
        };

        Self {
            app_name: APP_NAME.to_string(),
            version: BUNDLE_VERSION.to_string(),
            export_date: exported_at,
            admin_config: AdminConfig {
                prices: state.prices.clone(),
                delivery_zones: state.zones.clone(),
                novels: state.novelas.clone(),
            },
            documents,
            notifications: state.notifications.recent(BUNDLE_NOTIFICATION_LIMIT),
            metadata,
        }
    }

    /// Names of the generated documents, in archive order
    pub fn document_names(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> CartaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CartaError::Export(format!("Failed to serialize bundle: {}", e)))
    }

    /// The configuration as a snapshot ready to restore
    pub fn to_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            prices: Some(self.admin_config.prices.clone()),
            delivery_zones: Some(self.admin_config.delivery_zones.clone()),
            novels: Some(self.admin_config.novels.clone()),
            last_backup: None,
        }
    }
}
