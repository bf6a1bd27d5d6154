//! CLI commands for system export

use std::path::PathBuf;

use clap::ValueEnum;

use crate::backup::BackupManager;
use crate::error::CartaResult;
use crate::export::{self, ArtifactKind, DirectorySink};

use super::CliContext;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Zip with backup.json and the generated documents (JSON if the zip fails)
    Archive,
    /// The bundle as a single JSON file
    Json,
    /// The bundle as YAML, human-readable
    Yaml,
    /// Novelas and zones as two CSV files
    Csv,
}

/// Handle the export command
pub fn handle_export_command(
    ctx: &CliContext,
    format: ExportFormat,
    output_dir: Option<PathBuf>,
) -> CartaResult<()> {
    let dir = output_dir.unwrap_or_else(|| ctx.settings.export_dir(&ctx.paths));
    let sink = DirectorySink::new(dir.clone());
    let mut store = ctx.open_admin_store()?;
    let currency = ctx.settings.currency.as_str();

    let report = match format {
        ExportFormat::Archive => export::export(&mut store, &sink, currency)?,
        ExportFormat::Json => export::export_json(&mut store, &sink, currency)?,
        ExportFormat::Yaml => export::export_yaml(&store.state(), &sink, currency)?,
        ExportFormat::Csv => export::export_csv(&store.state(), &sink)?,
    };

    if report.fell_back() && matches!(format, ExportFormat::Archive) {
        println!("Archive could not be created; exported the JSON bundle instead.");
    }
    for path in &report.artifacts {
        println!("Exported: {}", path.display());
    }
    if !report.documents.is_empty() {
        println!("Documents: {}", report.documents.join(", "));
    }

    if matches!(report.kind, ArtifactKind::Archive | ArtifactKind::Json) {
        let manager = BackupManager::new(dir, ctx.settings.export.retention);
        let pruned = manager.enforce_retention()?;
        if !pruned.is_empty() {
            println!("Pruned {} old backup(s).", pruned.len());
        }
    }

    Ok(())
}
