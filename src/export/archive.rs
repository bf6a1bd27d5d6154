//! Zip archive of a system export

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{CartaError, CartaResult};

use super::bundle::ExportBundle;

/// Archive entry holding the bundle itself
pub const BACKUP_ENTRY: &str = "backup.json";

/// Build the archive: `backup.json` followed by every generated document
pub fn build_archive(bundle: &ExportBundle) -> CartaResult<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    writer.start_file(BACKUP_ENTRY, options)?;
    writer.write_all(bundle.to_json_pretty()?.as_bytes())?;

    for (name, content) in &bundle.documents {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(content.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Read the `backup.json` entry of an archive
pub fn read_backup_entry(bytes: &[u8]) -> CartaResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = archive.by_name(BACKUP_ENTRY).map_err(|_| {
        CartaError::Import(format!("Archive has no {} entry", BACKUP_ENTRY))
    })?;

    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Names of every entry in an archive
pub fn entry_names(bytes: &[u8]) -> CartaResult<Vec<String>> {
    let archive = ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.file_names().map(str::to_string).collect())
}
