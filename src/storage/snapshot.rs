//! The persisted admin snapshot
//!
//! A denormalized copy of the admin configuration kept under the
//! [`ADMIN_DATA_KEY`] storage key. Every field is optional on read; missing
//! fields keep whatever the state already had.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{CartaError, CartaResult};
use crate::models::{AdminState, DeliveryZone, Novela, PriceConfig};

use super::SnapshotStorage;

/// Storage key of the admin snapshot
pub const ADMIN_DATA_KEY: &str = "adminData";

/// Persisted form of the admin configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<PriceConfig>,

    #[serde(default, alias = "zones", skip_serializing_if = "Option::is_none")]
    pub delivery_zones: Option<Vec<DeliveryZone>>,

    #[serde(default, alias = "novelas", skip_serializing_if = "Option::is_none")]
    pub novels: Option<Vec<Novela>>,

    #[serde(default)]
    pub last_backup: Option<DateTime<Utc>>,
}

impl PersistedSnapshot {
    /// Snapshot of everything persisted from a state
    pub fn from_state(state: &AdminState) -> Self {
        Self {
            prices: Some(state.prices.clone()),
            delivery_zones: Some(state.zones.clone()),
            novels: Some(state.novelas.clone()),
            last_backup: state.last_backup,
        }
    }

    /// Whether the snapshot carries no data at all
    pub fn is_empty(&self) -> bool {
        self.prices.is_none()
            && self.delivery_zones.is_none()
            && self.novels.is_none()
            && self.last_backup.is_none()
    }

    /// Merge over a state: each present field replaces the current one
    pub fn merge_into(self, state: &mut AdminState) {
        if let Some(prices) = self.prices {
            state.prices = prices;
        }
        if let Some(zones) = self.delivery_zones {
            state.zones = zones;
        }
        if let Some(novels) = self.novels {
            state.novelas = novels;
        }
        if self.last_backup.is_some() {
            state.last_backup = self.last_backup;
        }
    }

    /// Parse a snapshot from a JSON value
    pub fn from_value(value: serde_json::Value) -> CartaResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| CartaError::Storage(format!("Invalid admin snapshot: {}", e)))
    }
}

/// Load the admin snapshot, treating unreadable or corrupt data as absent
///
/// Failures are recorded through `tracing` and never reach the caller.
pub fn load_snapshot(storage: &dyn SnapshotStorage) -> Option<PersistedSnapshot> {
    let value = match storage.read(ADMIN_DATA_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            error!(error = %e, "failed to read admin snapshot, using defaults");
            return None;
        }
    };

    match PersistedSnapshot::from_value(value) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            error!(error = %e, "discarding corrupt admin snapshot");
            None
        }
    }
}

/// Write the admin snapshot for a state
pub fn save_snapshot(storage: &dyn SnapshotStorage, state: &AdminState) -> CartaResult<()> {
    let value = serde_json::to_value(PersistedSnapshot::from_state(state))?;
    storage.write(ADMIN_DATA_KEY, &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewNovela, NewZone, NovelaId, ZoneId};
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn state_with_zone() -> AdminState {
        let mut state = AdminState::default();
        state.zones.push(DeliveryZone::from_new(
            ZoneId::new("1700000000000"),
            NewZone::new("Santiago de Cuba > Santiago de Cuba > Alameda", Money::from_pesos(150)),
            Utc::now(),
        ));
        state
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let state = state_with_zone();

        save_snapshot(&storage, &state).unwrap();
        let loaded = load_snapshot(&storage).unwrap();

        assert_eq!(loaded, PersistedSnapshot::from_state(&state));
    }

    #[test]
    fn test_free_novela_survives_merge() {
        let mut state = state_with_zone();
        state.novelas.push(Novela::from_new(
            NovelaId::new(7),
            NewNovela::new("Gratis", "Drama", 10, 2020, Money::zero(), Money::zero()),
            Utc::now(),
        ));
        let snapshot = PersistedSnapshot::from_state(&state);

        let mut merged = AdminState::default();
        snapshot.clone().merge_into(&mut merged);

        assert_eq!(PersistedSnapshot::from_state(&merged), snapshot);
        assert!(merged.novelas[0].cash_price.is_zero());
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let storage = MemoryStorage::with_entry(ADMIN_DATA_KEY, json!({"prices": "cheap"}));
        assert!(load_snapshot(&storage).is_none());
    }

    #[test]
    fn test_aliases_accepted() {
        let snapshot = PersistedSnapshot::from_value(json!({
            "zones": [],
            "novelas": []
        }))
        .unwrap();

        assert_eq!(snapshot.delivery_zones, Some(vec![]));
        assert_eq!(snapshot.novels, Some(vec![]));
        assert!(snapshot.prices.is_none());
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut state = state_with_zone();
        let mut prices = PriceConfig::default();
        prices.movie_price = Money::from_pesos(100);

        PersistedSnapshot {
            prices: Some(prices.clone()),
            ..Default::default()
        }
        .merge_into(&mut state);

        assert_eq!(state.prices, prices);
        assert_eq!(state.zones.len(), 1);
    }

    #[test]
    fn test_storefront_key_names() {
        let json = serde_json::to_value(PersistedSnapshot::from_state(&state_with_zone())).unwrap();
        assert!(json.get("deliveryZones").is_some());
        assert!(json.get("novels").is_some());
        assert!(json["lastBackup"].is_null());
    }
}
