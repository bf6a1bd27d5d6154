//! System export
//!
//! Produces the downloadable snapshot of the admin configuration. The
//! primary artifact is a zip archive; when it cannot be built or delivered
//! the bundle is delivered as a single JSON file instead. Only a delivered
//! artifact advances the store's last backup time.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::error::{CartaError, CartaResult};
use crate::models::AdminState;
use crate::services::ConfigStore;
use crate::storage::write_atomic;

use super::archive::build_archive;
use super::bundle::ExportBundle;
use super::csv::{export_novelas_csv, export_zones_csv};
use super::documents::DocumentGenerator;
use super::yaml::export_bundle_yaml;

pub const ARCHIVE_PREFIX: &str = "TV_a_la_Carta_Sistema_Completo_";
pub const JSON_PREFIX: &str = "TV_a_la_Carta_Backup_Completo_";
const YAML_PREFIX: &str = "TV_a_la_Carta_Export_";
const NOVELAS_CSV_PREFIX: &str = "TV_a_la_Carta_Novelas_";
const ZONES_CSV_PREFIX: &str = "TV_a_la_Carta_Zonas_";

/// Where exported artifacts go
pub trait ArtifactSink {
    /// Store `bytes` under `filename`, returning where they ended up
    fn deliver(&self, filename: &str, bytes: &[u8]) -> CartaResult<PathBuf>;
}

/// Writes artifacts into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> CartaResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            CartaError::Export(format!(
                "Failed to create export directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(filename);
        write_atomic(&path, bytes)?;
        Ok(path)
    }
}

/// Kind of artifact an export produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Archive,
    Json,
    Yaml,
    Csv,
}

/// Outcome of an export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub kind: ArtifactKind,
    pub artifacts: Vec<PathBuf>,
    pub exported_at: DateTime<Utc>,
    /// Generated documents carried by the artifact
    pub documents: Vec<String>,
}

impl ExportReport {
    /// The main artifact
    pub fn path(&self) -> Option<&Path> {
        self.artifacts.first().map(PathBuf::as_path)
    }

    /// Whether the archive had to be replaced by plain JSON
    pub fn fell_back(&self) -> bool {
        self.kind == ArtifactKind::Json
    }
}

/// Timestamp suffix used in artifact file names
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Build the bundle for a state, documents included
pub fn build_bundle(
    state: &AdminState,
    at: DateTime<Utc>,
    currency: &str,
) -> CartaResult<ExportBundle> {
    let documents = DocumentGenerator::new(state, at).currency(currency).generate()?;
    Ok(ExportBundle::new(state, documents, at))
}

/// Export the full system now
pub fn export(
    store: &mut ConfigStore,
    sink: &dyn ArtifactSink,
    currency: &str,
) -> CartaResult<ExportReport> {
    export_at(store, sink, currency, Utc::now())
}

/// Export the full system as of `at`
///
/// Tries the archive first and falls back to the JSON bundle. On success the
/// store records the backup; when both deliveries fail an error notification
/// is logged and the last backup time is left as it was.
pub fn export_at(
    store: &mut ConfigStore,
    sink: &dyn ArtifactSink,
    currency: &str,
    at: DateTime<Utc>,
) -> CartaResult<ExportReport> {
    let state = store.state();
    let stamp = file_timestamp(at);

    let bundle = match build_bundle(&state, at, currency) {
        Ok(bundle) => bundle,
        Err(e) => {
            store.notify_export_failure(&e.to_string());
            return Err(e);
        }
    };
    let documents = bundle.document_names();

    let archive_name = format!("{}{}.zip", ARCHIVE_PREFIX, stamp);
    let delivered = build_archive(&bundle)
        .and_then(|bytes| sink.deliver(&archive_name, &bytes))
        .map(|path| (ArtifactKind::Archive, path))
        .or_else(|e| {
            warn!(error = %e, "archive export failed, falling back to JSON");
            let json_name = format!("{}{}.json", JSON_PREFIX, stamp);
            let json = bundle.to_json_pretty()?;
            sink.deliver(&json_name, json.as_bytes())
                .map(|path| (ArtifactKind::Json, path))
        });

    match delivered {
        Ok((kind, path)) => {
            info!(path = %path.display(), "system exported");
            store.record_backup(at, documents.clone());
            Ok(ExportReport {
                kind,
                artifacts: vec![path],
                exported_at: at,
                documents,
            })
        }
        Err(e) => {
            error!(error = %e, "system export failed");
            store.notify_export_failure(&e.to_string());
            Err(e)
        }
    }
}

/// Export the bundle straight to JSON, skipping the archive
pub fn export_json(
    store: &mut ConfigStore,
    sink: &dyn ArtifactSink,
    currency: &str,
) -> CartaResult<ExportReport> {
    let at = Utc::now();
    let bundle = build_bundle(&store.state(), at, currency)?;
    let documents = bundle.document_names();

    let filename = format!("{}{}.json", JSON_PREFIX, file_timestamp(at));
    let path = match sink.deliver(&filename, bundle.to_json_pretty()?.as_bytes()) {
        Ok(path) => path,
        Err(e) => {
            store.notify_export_failure(&e.to_string());
            return Err(e);
        }
    };

    store.record_backup(at, documents.clone());
    Ok(ExportReport {
        kind: ArtifactKind::Json,
        artifacts: vec![path],
        exported_at: at,
        documents,
    })
}

/// Render the bundle as YAML
///
/// A report, not a backup: the last backup time is not touched.
pub fn export_yaml(
    state: &AdminState,
    sink: &dyn ArtifactSink,
    currency: &str,
) -> CartaResult<ExportReport> {
    let at = Utc::now();
    let bundle = build_bundle(state, at, currency)?;

    let mut bytes = Vec::new();
    export_bundle_yaml(&bundle, &mut bytes)?;
    let path = sink.deliver(&format!("{}{}.yaml", YAML_PREFIX, file_timestamp(at)), &bytes)?;

    Ok(ExportReport {
        kind: ArtifactKind::Yaml,
        artifacts: vec![path],
        exported_at: at,
        documents: bundle.document_names(),
    })
}

/// Write the catalog and the zones as two CSV files
pub fn export_csv(state: &AdminState, sink: &dyn ArtifactSink) -> CartaResult<ExportReport> {
    let at = Utc::now();
    let stamp = file_timestamp(at);

    let mut novelas = Vec::new();
    export_novelas_csv(&state.novelas, &mut novelas)?;
    let mut zones = Vec::new();
    export_zones_csv(&state.zones, &mut zones)?;

    let artifacts = vec![
        sink.deliver(&format!("{}{}.csv", NOVELAS_CSV_PREFIX, stamp), &novelas)?,
        sink.deliver(&format!("{}{}.csv", ZONES_CSV_PREFIX, stamp), &zones)?,
    ];

    Ok(ExportReport {
        kind: ArtifactKind::Csv,
        artifacts,
        exported_at: at,
        documents: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_CURRENCY;
    use crate::export::archive::{entry_names, read_backup_entry};
    use crate::models::{NotificationKind, Section};
    use crate::services::Authenticator;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn store() -> ConfigStore {
        ConfigStore::open(
            Box::new(MemoryStorage::new()),
            Authenticator::default_credentials().unwrap(),
        )
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
    }

    /// Rejects zip files, accepts everything else
    struct NoZipSink {
        delivered: RefCell<Vec<String>>,
    }

    impl ArtifactSink for NoZipSink {
        fn deliver(&self, filename: &str, _bytes: &[u8]) -> CartaResult<PathBuf> {
            if filename.ends_with(".zip") {
                return Err(CartaError::Export("disk full".into()));
            }
            self.delivered.borrow_mut().push(filename.to_string());
            Ok(PathBuf::from(filename))
        }
    }

    struct BrokenSink;

    impl ArtifactSink for BrokenSink {
        fn deliver(&self, _filename: &str, _bytes: &[u8]) -> CartaResult<PathBuf> {
            Err(CartaError::Export("read-only".into()))
        }
    }

    #[test]
    fn test_archive_export() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut store = store();

        let report = export_at(&mut store, &sink, DEFAULT_CURRENCY, at()).unwrap();

        assert_eq!(report.kind, ArtifactKind::Archive);
        let path = report.path().unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "TV_a_la_Carta_Sistema_Completo_2024-06-01_12-30-00.zip"
        );

        let bytes = std::fs::read(path).unwrap();
        let names = entry_names(&bytes).unwrap();
        assert!(names.contains(&"backup.json".to_string()));
        assert!(names.contains(&"CONFIGURACION_ACTUAL.md".to_string()));
        assert!(names.contains(&"INSTALACION.md".to_string()));

        assert_eq!(store.last_backup(), Some(at()));
        let latest = store.notifications().latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Success);
        assert_eq!(latest.section, Section::System);
    }

    #[test]
    fn test_metadata_matches_live_counts() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut store = store();
        let first = store.zones()[0].id.clone();
        store.remove_zone(&first);

        let report = export_at(&mut store, &sink, DEFAULT_CURRENCY, at()).unwrap();
        let bytes = std::fs::read(report.path().unwrap()).unwrap();
        let bundle: ExportBundle =
            serde_json::from_str(&read_backup_entry(&bytes).unwrap()).unwrap();

        assert_eq!(bundle.metadata.total_zones, store.zones().len());
        assert_eq!(bundle.metadata.active_zones, store.active_zones().len());
        assert_eq!(bundle.metadata.total_novelas, store.novelas().len());
        assert_eq!(bundle.metadata.synced_files, bundle.documents.len());
        // lastBackup in the bundle is the one before this export
        assert_eq!(bundle.metadata.last_backup, None);
    }

    #[test]
    fn test_failing_archive_falls_back_to_json() {
        let sink = NoZipSink {
            delivered: RefCell::new(Vec::new()),
        };
        let mut store = store();

        let report = export_at(&mut store, &sink, DEFAULT_CURRENCY, at()).unwrap();

        assert!(report.fell_back());
        assert_eq!(
            sink.delivered.borrow().as_slice(),
            ["TV_a_la_Carta_Backup_Completo_2024-06-01_12-30-00.json"]
        );
        assert_eq!(store.last_backup(), Some(at()));
    }

    #[test]
    fn test_total_failure_keeps_last_backup() {
        let mut store = store();
        let before = store.state();

        let result = export_at(&mut store, &BrokenSink, DEFAULT_CURRENCY, at());

        assert!(result.is_err());
        assert_eq!(store.last_backup(), None);
        assert_eq!(store.prices(), &before.prices);
        assert_eq!(store.zones(), before.zones.as_slice());
        assert_eq!(
            store.notifications().latest().unwrap().kind,
            NotificationKind::Error
        );
    }

    #[test]
    fn test_export_is_read_only_over_config() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut store = store();
        let before = store.state();

        export_at(&mut store, &sink, DEFAULT_CURRENCY, at()).unwrap();

        assert_eq!(store.prices(), &before.prices);
        assert_eq!(store.zones(), before.zones.as_slice());
        assert_eq!(store.novelas(), before.novelas.as_slice());
    }

    #[test]
    fn test_csv_and_yaml_do_not_record_backup() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let store = store();

        let csv = export_csv(&store.state(), &sink).unwrap();
        assert_eq!(csv.artifacts.len(), 2);
        assert!(csv.artifacts.iter().all(|p| p.exists()));

        let yaml = export_yaml(&store.state(), &sink, DEFAULT_CURRENCY).unwrap();
        assert!(yaml.path().unwrap().exists());

        assert_eq!(store.last_backup(), None);
    }

    #[test]
    fn test_json_export_records_backup() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path());
        let mut store = store();

        let report = export_json(&mut store, &sink, DEFAULT_CURRENCY).unwrap();
        let json = std::fs::read_to_string(report.path().unwrap()).unwrap();
        let bundle: ExportBundle = serde_json::from_str(&json).unwrap();

        assert_eq!(bundle.admin_config.novels.len(), store.novelas().len());
        assert!(store.last_backup().is_some());
    }

    #[test]
    fn test_bundle_documents_use_given_currency() {
        let store = store();
        let bundle = build_bundle(&store.state(), at(), "EUR").unwrap();

        let summary = &bundle.documents["CONFIGURACION_ACTUAL.md"];
        assert!(summary.contains("por capítulo"));
        assert!(summary.contains(" EUR"));
        assert!(!summary.contains(" CUP"));
    }
}
