//! Export module for the admin configuration
//!
//! - Archive: zip with `backup.json` and the generated documents (the backup)
//! - JSON: the bundle alone, also the archive's fallback
//! - YAML: human-readable rendering of the bundle
//! - CSV: novela catalog and delivery zones for spreadsheets

pub mod archive;
pub mod bundle;
pub mod csv;
pub mod documents;
pub mod exporter;
pub mod yaml;

pub use archive::{build_archive, read_backup_entry, BACKUP_ENTRY};
pub use bundle::{AdminConfig, BundleMetadata, ExportBundle, APP_NAME, BUNDLE_VERSION};
pub use csv::{export_novelas_csv, export_zones_csv};
pub use documents::DocumentGenerator;
pub use exporter::{
    build_bundle, export, export_at, export_csv, export_json, export_yaml, ArtifactKind,
    ArtifactSink, DirectorySink, ExportReport, ARCHIVE_PREFIX, JSON_PREFIX,
};
pub use yaml::{export_bundle_yaml, import_bundle_yaml};
