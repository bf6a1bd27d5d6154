//! Restoring the configuration from an exported backup
//!
//! Accepts any artifact the exporter produces: the zip archive (its
//! `backup.json` entry), the plain JSON bundle, or the YAML rendering. Only
//! the `adminConfig` part is read back; it goes through the store's
//! `Restore` command so the merge follows the same rules as a snapshot load.
//!
//! Bundles from before per-novela pricing carry novelas without
//! `costoEfectivo`/`costoTransferencia`; those are priced from the chapter
//! price when restored. A novela whose stored prices are zero is left alone.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CartaError, CartaResult};
use crate::export::read_backup_entry;
use crate::models::NovelaId;
use crate::services::ConfigStore;
use crate::storage::PersistedSnapshot;

/// The parts of a bundle needed to restore it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleHeader {
    #[serde(default)]
    app_name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    export_date: Option<DateTime<Utc>>,
    admin_config: Value,
}

/// A backup read from disk, not yet applied
#[derive(Debug, Clone)]
pub struct LoadedBackup {
    pub app_name: Option<String>,
    pub version: Option<String>,
    pub export_date: Option<DateTime<Utc>>,
    pub snapshot: PersistedSnapshot,
    /// Novelas written without price fields
    pub unpriced: Vec<NovelaId>,
}

/// Result of a restore operation
#[derive(Debug, Default)]
pub struct RestoreResult {
    pub export_date: Option<DateTime<Utc>>,
    pub prices_restored: bool,
    pub zones_restored: usize,
    pub novelas_restored: usize,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.prices_restored {
            parts.push("prices".to_string());
        }
        parts.push(format!("{} zones", self.zones_restored));
        parts.push(format!("{} novelas", self.novelas_restored));

        match self.export_date {
            Some(date) => format!(
                "Restored {} from the export of {}",
                parts.join(", "),
                date.format("%Y-%m-%d %H:%M:%S")
            ),
            None => format!("Restored {}", parts.join(", ")),
        }
    }
}

/// Read a backup file without applying it
pub fn load_backup(path: &Path) -> CartaResult<LoadedBackup> {
    let bytes = fs::read(path)
        .map_err(|e| CartaError::Io(format!("Failed to read backup file: {}", e)))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let header: BundleHeader = if bytes.starts_with(b"PK") {
        serde_json::from_str(&read_backup_entry(&bytes)?)
            .map_err(|e| CartaError::Import(format!("Invalid backup.json: {}", e)))?
    } else if is_yaml {
        serde_yaml::from_slice(&bytes)
            .map_err(|e| CartaError::Import(format!("Invalid YAML backup: {}", e)))?
    } else {
        serde_json::from_slice(&bytes)
            .map_err(|e| CartaError::Import(format!("Invalid JSON backup: {}", e)))?
    };

    let unpriced = unpriced_novelas(&header.admin_config);
    let snapshot = PersistedSnapshot::from_value(header.admin_config)
        .map_err(|e| CartaError::Import(e.to_string()))?;
    if snapshot.prices.is_none() && snapshot.delivery_zones.is_none() && snapshot.novels.is_none()
    {
        return Err(CartaError::Import(
            "Backup carries no prices, zones or novelas".into(),
        ));
    }

    Ok(LoadedBackup {
        app_name: header.app_name,
        version: header.version,
        export_date: header.export_date,
        snapshot,
        unpriced,
    })
}

/// Ids of the novelas that carry neither price key
fn unpriced_novelas(admin_config: &Value) -> Vec<NovelaId> {
    let novels = admin_config
        .get("novels")
        .or_else(|| admin_config.get("novelas"))
        .and_then(Value::as_array);

    novels
        .into_iter()
        .flatten()
        .filter(|novel| {
            novel.get("costoEfectivo").is_none() && novel.get("costoTransferencia").is_none()
        })
        .filter_map(|novel| novel.get("id").and_then(Value::as_i64))
        .map(NovelaId::new)
        .collect()
}

/// Read a backup and apply it to the store
pub fn restore_from_file(store: &mut ConfigStore, path: &Path) -> CartaResult<RestoreResult> {
    let backup = load_backup(path)?;
    let mut snapshot = backup.snapshot;

    let prices = snapshot
        .prices
        .clone()
        .unwrap_or_else(|| store.prices().clone());
    for novela in snapshot.novels.iter_mut().flatten() {
        if backup.unpriced.contains(&novela.id) {
            novela.reprice(&prices);
        }
    }

    let result = RestoreResult {
        export_date: backup.export_date,
        prices_restored: snapshot.prices.is_some(),
        zones_restored: snapshot.delivery_zones.as_ref().map_or(0, Vec::len),
        novelas_restored: snapshot.novels.as_ref().map_or(0, Vec::len),
    };

    store.restore(snapshot);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_CURRENCY;
    use crate::export::{export_at, export_json, export_yaml, DirectorySink};
    use crate::models::{Money, NewNovela, NewZone, PriceConfig};
    use crate::services::Authenticator;
    use crate::storage::MemoryStorage;
    use tempfile::TempDir;

    fn store() -> ConfigStore {
        ConfigStore::open(
            Box::new(MemoryStorage::new()),
            Authenticator::default_credentials().unwrap(),
        )
    }

    fn customized() -> ConfigStore {
        let mut store = store();
        store.set_prices(PriceConfig {
            movie_price: Money::from_pesos(120),
            ..PriceConfig::default()
        });
        store.add_zone(NewZone::new("Santiago de Cuba > Songo > La Maya", Money::from_pesos(300)));
        store
    }

    #[test]
    fn test_restore_from_archive() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut source = customized();
        let report = export_at(&mut source, &sink, DEFAULT_CURRENCY, Utc::now()).unwrap();

        let mut target = store();
        let result = restore_from_file(&mut target, report.path().unwrap()).unwrap();

        assert!(result.prices_restored);
        assert_eq!(result.zones_restored, source.zones().len());
        assert_eq!(target.prices().movie_price, Money::from_pesos(120));
        assert_eq!(target.zones(), source.zones());
        assert_eq!(target.novelas(), source.novelas());
    }

    #[test]
    fn test_restore_from_json_and_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut source = customized();

        let json = export_json(&mut source, &sink, DEFAULT_CURRENCY).unwrap();
        let mut target = store();
        restore_from_file(&mut target, json.path().unwrap()).unwrap();
        assert_eq!(target.zones(), source.zones());

        let yaml = export_yaml(&source.state(), &sink, DEFAULT_CURRENCY).unwrap();
        let mut target = store();
        restore_from_file(&mut target, yaml.path().unwrap()).unwrap();
        assert_eq!(target.prices(), source.prices());
    }

    #[test]
    fn test_legacy_bundle_without_novela_prices() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{
                "appName": "TV a la Carta",
                "adminConfig": {
                    "prices": {"moviePrice": 80, "seriesPrice": 300,
                               "transferFeePercentage": 10, "novelPricePerChapter": 5},
                    "novels": [{"id": 1, "titulo": "Rubí", "genero": "Drama",
                                "capitulos": 20, "año": 2004,
                                "createdAt": "2024-01-01T00:00:00Z",
                                "updatedAt": "2024-01-01T00:00:00Z"}]
                },
                "systemFiles": {}
            }"#,
        )
        .unwrap();

        let mut target = store();
        let zones_before = target.zones().to_vec();
        let result = restore_from_file(&mut target, &path).unwrap();

        assert_eq!(result.novelas_restored, 1);
        assert_eq!(target.novelas()[0].cash_price, Money::from_pesos(100));
        assert_eq!(target.novelas()[0].transfer_price, Money::from_pesos(110));
        // absent zones keep the current ones
        assert_eq!(target.zones(), zones_before.as_slice());
    }

    #[test]
    fn test_zero_priced_novela_is_not_repriced() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut source = store();
        let gratis = source
            .add_novela(NewNovela::new("Gratis", "Drama", 10, 2020, Money::zero(), Money::zero()))
            .unwrap();

        let report = export_json(&mut source, &sink, DEFAULT_CURRENCY).unwrap();
        let loaded = load_backup(report.path().unwrap()).unwrap();
        assert!(loaded.unpriced.is_empty());

        let mut target = store();
        restore_from_file(&mut target, report.path().unwrap()).unwrap();
        let restored = target.novela(gratis.id).unwrap();
        assert!(restored.cash_price.is_zero());
        assert!(restored.transfer_price.is_zero());
    }

    #[test]
    fn test_rejects_unrelated_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("other.json");
        fs::write(&path, r#"{"adminConfig": {}}"#).unwrap();

        assert!(load_backup(&path).is_err());

        fs::write(&path, r#"{"accounts": []}"#).unwrap();
        assert!(load_backup(&path).is_err());
    }
}
