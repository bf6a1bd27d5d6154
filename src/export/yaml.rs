//! YAML Export functionality
//!
//! Renders an export bundle as YAML for human-readable backup.

use std::io::Write;

use crate::error::{CartaError, CartaResult};
use crate::export::bundle::ExportBundle;

/// Write a bundle as YAML, preceded by a comment header
pub fn export_bundle_yaml<W: Write>(bundle: &ExportBundle, writer: &mut W) -> CartaResult<()> {
    let header = format!(
        "# {} system export\n# Generated: {}\n# Version: {}\n#\n# Restore with `carta backup restore <file>`.\n\n",
        bundle.app_name, bundle.export_date, bundle.version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| CartaError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, bundle).map_err(|e| CartaError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a bundle from YAML
pub fn import_bundle_yaml(yaml_str: &str) -> CartaResult<ExportBundle> {
    serde_yaml::from_str(yaml_str).map_err(|e| CartaError::Import(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::default_state;
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn test_yaml_export() {
        let now = Utc::now();
        let state = default_state(now);
        let bundle = ExportBundle::new(&state, BTreeMap::new(), now);

        let mut output = Vec::new();
        export_bundle_yaml(&bundle, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# TV a la Carta system export"));
        assert!(yaml.contains("appName: TV a la Carta"));
        assert!(yaml.contains("deliveryZones:"));
    }

    #[test]
    fn test_yaml_import_reads_export() {
        let now = Utc::now();
        let state = default_state(now);
        let bundle = ExportBundle::new(&state, BTreeMap::new(), now);

        let mut output = Vec::new();
        export_bundle_yaml(&bundle, &mut output).unwrap();
        let parsed = import_bundle_yaml(&String::from_utf8(output).unwrap()).unwrap();

        assert_eq!(parsed.metadata, bundle.metadata);
        assert_eq!(
            parsed.admin_config.delivery_zones.len(),
            state.zones.len()
        );
    }

    #[test]
    fn test_yaml_import_rejects_garbage() {
        assert!(import_bundle_yaml("appName: [").is_err());
    }
}
