//! Generated export documents
//!
//! Human-readable companions to `backup.json`, all rendered from the same
//! admin state so the numbers in every file agree.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::config::settings::DEFAULT_CURRENCY;
use crate::error::{CartaError, CartaResult};
use crate::models::AdminState;

use super::bundle::{APP_NAME, BUNDLE_VERSION};

pub const CONFIG_SUMMARY_DOC: &str = "CONFIGURACION_ACTUAL.md";
pub const INSTALL_DOC: &str = "INSTALACION.md";
pub const README_DOC: &str = "README.md";
pub const SYSTEM_CONFIG_DOC: &str = "config/system-configuration.json";

/// Notifications listed as recent changes in the system configuration
pub const RECENT_CHANGES_LIMIT: usize = 20;

/// Renders the export documents for one state at one point in time
pub struct DocumentGenerator<'a> {
    state: &'a AdminState,
    generated_at: DateTime<Utc>,
    currency: &'a str,
}

impl<'a> DocumentGenerator<'a> {
    pub fn new(state: &'a AdminState, generated_at: DateTime<Utc>) -> Self {
        Self {
            state,
            generated_at,
            currency: DEFAULT_CURRENCY,
        }
    }

    /// Currency code printed after every amount
    pub fn currency(mut self, currency: &'a str) -> Self {
        self.currency = currency;
        self
    }

    /// Every document keyed by its path inside the archive
    pub fn generate(&self) -> CartaResult<BTreeMap<String, String>> {
        let mut documents = BTreeMap::new();
        documents.insert(CONFIG_SUMMARY_DOC.to_string(), self.config_summary());
        documents.insert(INSTALL_DOC.to_string(), self.install_notes());
        documents.insert(README_DOC.to_string(), self.readme());
        documents.insert(SYSTEM_CONFIG_DOC.to_string(), self.system_configuration()?);
        Ok(documents)
    }

    fn stamp(&self) -> String {
        self.generated_at.format("%d/%m/%Y %H:%M:%S UTC").to_string()
    }

    fn price_lines(&self) -> String {
        let prices = &self.state.prices;
        let cur = self.currency;
        let mut out = format!("- Películas: {} {}\n", prices.movie_price, cur);
        out.push_str(&format!("- Series: {} {} por temporada\n", prices.series_price, cur));
        out.push_str(&format!(
            "- Recargo transferencia: {}%\n",
            prices.transfer_fee_percentage
        ));
        out.push_str(&format!(
            "- Novelas: {} {} por capítulo\n",
            prices.novel_price_per_chapter, cur
        ));
        out
    }

    /// Current prices, every zone with its cost and every novela with its length
    pub fn config_summary(&self) -> String {
        let state = self.state;
        let mut out = String::from("# Configuración Actual del Sistema\n\n");
        out.push_str(&format!("## Exportado el: {}\n\n", self.stamp()));

        out.push_str("### Precios Aplicados:\n");
        out.push_str(&self.price_lines());

        out.push_str(&format!("\n### Zonas de Entrega: {}\n", state.zones.len()));
        for zone in &state.zones {
            let inactive = if zone.active { "" } else { " (inactiva)" };
            out.push_str(&format!(
                "- {}: {} {}{}\n",
                zone.name, zone.cost, self.currency, inactive
            ));
        }

        out.push_str(&format!("\n### Novelas: {}\n", state.novelas.len()));
        for novela in &state.novelas {
            out.push_str(&format!("- {}: {} capítulos\n", novela.title, novela.chapters));
        }

        out.push_str("\nTodos los archivos contienen estas configuraciones aplicadas.\n");
        out
    }

    pub fn install_notes(&self) -> String {
        let mut out = format!("# Instalación de {}\n\n", APP_NAME);
        out.push_str(&format!("Versión del paquete: {}\n", BUNDLE_VERSION));
        out.push_str(&format!("Generado: {}\n\n", self.stamp()));

        out.push_str("## Restaurar la configuración\n\n");
        out.push_str("1. Copie este archivo comprimido al equipo de administración.\n");
        out.push_str("2. Ejecute `carta backup restore <archivo>`.\n");
        out.push_str(
            "3. Verifique los precios con `carta prices show` y las zonas con `carta zone list`.\n\n",
        );

        out.push_str("## Contenido\n\n");
        out.push_str(
            "- `backup.json`: configuración completa (precios, zonas, novelas) y notificaciones recientes\n",
        );
        out.push_str(&format!(
            "- `{}`: resumen legible de la configuración\n",
            CONFIG_SUMMARY_DOC
        ));
        out.push_str(&format!("- `{}`: estado del sistema\n", README_DOC));
        out.push_str(&format!(
            "- `{}`: configuración en formato JSON con los cambios recientes\n",
            SYSTEM_CONFIG_DOC
        ));
        out
    }

    pub fn readme(&self) -> String {
        let state = self.state;
        let mut out = format!("# {} - Sistema de Control\n\n", APP_NAME);
        out.push_str(&format!("**Última actualización:** {}\n", self.stamp()));
        out.push_str(&format!("**Versión del sistema:** {}\n\n", BUNDLE_VERSION));

        out.push_str("### Precios Configurados\n");
        out.push_str(&self.price_lines());

        out.push_str("\n### Zonas de Entrega Configuradas\n");
        out.push_str(&format!("Total de zonas configuradas: {}\n", state.zones.len()));
        out.push_str(&format!("Zonas activas: {}\n", state.active_zone_count()));

        out.push_str("\n### Catálogo de Novelas\n");
        out.push_str(&format!("Total de novelas: {}\n", state.novelas.len()));
        out.push_str(&format!("Novelas activas: {}\n", state.active_novela_count()));

        out.push_str("\n---\n");
        out.push_str(&format!(
            "*Generado automáticamente por {} Admin v{}*\n",
            APP_NAME, BUNDLE_VERSION
        ));
        out
    }

    /// Machine-readable configuration plus the most recent changes
    pub fn system_configuration(&self) -> CartaResult<String> {
        let state = self.state;
        let document = json!({
            "lastModified": self.generated_at,
            "currentPrices": state.prices,
            "deliveryZones": state.zones,
            "novels": state.novelas,
            "recentChanges": state.notifications.recent(RECENT_CHANGES_LIMIT),
            "version": BUNDLE_VERSION,
        });

        serde_json::to_string_pretty(&document).map_err(|e| {
            CartaError::Export(format!("Failed to render {}: {}", SYSTEM_CONFIG_DOC, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notification, NotificationKind, Section};
    use crate::storage::default_state;

    #[test]
    fn test_generates_all_documents() {
        let state = default_state(Utc::now());
        let documents = DocumentGenerator::new(&state, Utc::now()).generate().unwrap();

        let names: Vec<_> = documents.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "CONFIGURACION_ACTUAL.md",
                "INSTALACION.md",
                "README.md",
                "config/system-configuration.json"
            ]
        );
    }

    #[test]
    fn test_summary_lists_zones_and_novelas() {
        let mut state = default_state(Utc::now());
        state.prices.movie_price = crate::models::Money::from_pesos(95);

        let summary = DocumentGenerator::new(&state, Utc::now()).config_summary();

        assert!(summary.contains("- Películas: $95 CUP"));
        assert!(summary.contains(&format!("### Zonas de Entrega: {}", state.zones.len())));
        assert!(summary.contains(&format!(
            "- {}: {} capítulos",
            state.novelas[0].title, state.novelas[0].chapters
        )));
        assert!(summary.contains(&state.zones[0].name));
    }

    #[test]
    fn test_summary_uses_configured_currency() {
        let state = default_state(Utc::now());

        let summary = DocumentGenerator::new(&state, Utc::now())
            .currency("USD")
            .config_summary();

        assert!(summary.contains("- Películas: $80 USD"));
        assert!(summary.contains(&format!("- {}: {} USD", state.zones[0].name, state.zones[0].cost)));
        assert!(!summary.contains("CUP"));
    }

    #[test]
    fn test_readme_counts() {
        let mut state = default_state(Utc::now());
        state.zones[0].active = false;

        let readme = DocumentGenerator::new(&state, Utc::now()).readme();
        assert!(readme.contains(&format!("Zonas activas: {}", state.zones.len() - 1)));
        assert!(readme.contains(&format!("Total de novelas: {}", state.novelas.len())));
    }

    #[test]
    fn test_system_configuration_caps_recent_changes() {
        let now = Utc::now();
        let mut state = AdminState::default();
        for i in 0..30 {
            state.notifications.push(Notification::new(
                NotificationKind::Success,
                Section::Zones,
                "Add Zone",
                format!("change {}", i),
                "",
                now,
            ));
        }

        let rendered = DocumentGenerator::new(&state, now)
            .system_configuration()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        let changes = value["recentChanges"].as_array().unwrap();
        assert_eq!(changes.len(), RECENT_CHANGES_LIMIT);
        assert_eq!(changes[0]["title"], "change 29");
        assert_eq!(value["version"], BUNDLE_VERSION);
    }
}
