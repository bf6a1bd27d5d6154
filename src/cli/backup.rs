//! Listing, pruning and restoring exported backups

use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::Subcommand;

use crate::backup::{load_backup, restore_from_file, BackupInfo, BackupManager, LoadedBackup};
use crate::error::{CartaError, CartaResult};
use crate::export::ArtifactKind;

use super::CliContext;

#[derive(Subcommand)]
pub enum BackupCommands {
    /// List exported backups, newest first
    List {
        /// Include full timestamps and paths
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete backups beyond the retention count
    Prune,

    /// Replace the configuration with the contents of a backup
    Restore {
        /// File name in the export directory, a path, or 'latest'
        backup: String,

        /// Apply without asking for a second run
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_backup_command(ctx: &CliContext, cmd: BackupCommands) -> CartaResult<()> {
    let manager = BackupManager::new(
        ctx.settings.export_dir(&ctx.paths),
        ctx.settings.export.retention,
    );

    match cmd {
        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found in {}", manager.export_dir().display());
                println!("Create one with: carta export");
                return Ok(());
            }

            print!("{}", format_backup_table(&backups, verbose));
            println!(
                "Total: {} backup(s), retention keeps {}",
                backups.len(),
                manager.retention()
            );
        }

        BackupCommands::Prune => {
            ctx.open_admin_store()?;
            let deleted = manager.enforce_retention()?;
            for path in &deleted {
                println!("Deleted: {}", path.display());
            }
            match deleted.len() {
                0 => println!("Nothing to prune."),
                n => println!("Pruned {} backup(s).", n),
            }
        }

        BackupCommands::Restore { backup, force } => {
            let path = resolve_backup_path(&manager, &backup)?;
            let loaded = load_backup(&path)?;
            print!("{}", describe_backup(&path, &loaded));

            if !force {
                println!("Restoring replaces the current prices, zones and novelas.");
                println!("Run again with --force to apply:");
                println!("  carta backup restore {} --force", backup);
                return Ok(());
            }

            let mut store = ctx.open_admin_store()?;
            let result = restore_from_file(&mut store, &path)?;
            println!("Restore complete!");
            println!("{}", result.summary());
        }
    }

    Ok(())
}

fn format_backup_table(backups: &[BackupInfo], verbose: bool) -> String {
    let now = Utc::now();
    let width = backups.iter().map(|b| b.filename.len()).max().unwrap_or(0);

    let mut out = format!(
        "{:>3}  {:<width$}  {:<7}  {:>9}  {}\n",
        "#", "File", "Format", "Size", "Age"
    );
    out.push_str(&format!("{}\n", "-".repeat(width + 36)));

    for (i, backup) in backups.iter().enumerate() {
        let kind = match backup.kind {
            ArtifactKind::Archive => "zip",
            _ => "json",
        };
        out.push_str(&format!(
            "{:>3}  {:<width$}  {:<7}  {:>9}  {}\n",
            i + 1,
            backup.filename,
            kind,
            human_size(backup.size_bytes),
            human_age(now.signed_duration_since(backup.created_at)),
        ));
        if verbose {
            out.push_str(&format!(
                "     exported {} at {}\n",
                backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                backup.path.display()
            ));
        }
    }
    out.push('\n');
    out
}

fn describe_backup(path: &std::path::Path, loaded: &LoadedBackup) -> String {
    let snapshot = &loaded.snapshot;
    let mut out = format!("Backup: {}\n", path.display());
    if let Some(app) = &loaded.app_name {
        out.push_str(&format!("  App:      {}\n", app));
    }
    if let Some(version) = &loaded.version {
        out.push_str(&format!("  Version:  {}\n", version));
    }
    if let Some(date) = loaded.export_date {
        out.push_str(&format!("  Exported: {}\n", date.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    out.push_str(&format!(
        "  Contents: {} zones, {} novelas, prices {}\n\n",
        snapshot.delivery_zones.as_ref().map_or(0, Vec::len),
        snapshot.novels.as_ref().map_or(0, Vec::len),
        if snapshot.prices.is_some() { "included" } else { "missing" },
    ));
    out
}

fn resolve_backup_path(manager: &BackupManager, backup: &str) -> CartaResult<PathBuf> {
    if backup == "latest" {
        return manager
            .get_latest_backup()?
            .map(|info| info.path)
            .ok_or_else(|| CartaError::Import("No backups found".into()));
    }

    [PathBuf::from(backup), manager.export_dir().join(backup)]
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| CartaError::NotFound {
            entity_type: "Backup",
            identifier: backup.to_string(),
        })
}

fn human_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1 << 20 => format!("{:.1} MB", b as f64 / (1u64 << 20) as f64),
        b if b >= 1 << 10 => format!("{:.1} KB", b as f64 / (1u64 << 10) as f64),
        b => format!("{} B", b),
    }
}

fn human_age(age: Duration) -> String {
    if age.num_minutes() < 1 {
        "just now".to_string()
    } else if age.num_hours() < 1 {
        format!("{} min ago", age.num_minutes())
    } else if age.num_days() < 1 {
        format!("{} h ago", age.num_hours())
    } else {
        format!("{} days ago", age.num_days())
    }
}
