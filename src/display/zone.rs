//! Delivery zone display formatting

use crate::models::DeliveryZone;

/// Format zones as a table
pub fn format_zone_list(zones: &[&DeliveryZone]) -> String {
    if zones.is_empty() {
        return "No delivery zones found.".to_string();
    }

    let id_width = zones
        .iter()
        .map(|z| z.id.as_str().chars().count())
        .max()
        .unwrap_or(2)
        .max(2);

    let name_width = zones
        .iter()
        .map(|z| z.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<name_width$}  {:>10}  {}\n",
        "ID",
        "Name",
        "Cost",
        "Status",
        id_width = id_width,
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<name_width$}  {:->10}  {:-<8}\n",
        "",
        "",
        "",
        "",
        id_width = id_width,
        name_width = name_width,
    ));

    for zone in zones {
        output.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {:>10}  {}\n",
            zone.id.as_str(),
            zone.name,
            zone.cost.to_string(),
            if zone.active { "Active" } else { "Inactive" },
            id_width = id_width,
            name_width = name_width,
        ));
    }

    let active = zones.iter().filter(|z| z.active).count();
    output.push_str(&format!("\n{} zone(s), {} active\n", zones.len(), active));

    output
}

/// Format a single zone's details
pub fn format_zone_details(zone: &DeliveryZone) -> String {
    let mut output = String::new();

    output.push_str(&format!("Zone: {}\n", zone.short_name()));
    output.push_str(&format!("  ID:       {}\n", zone.id));
    output.push_str(&format!("  Path:     {}\n", zone.path().join(" / ")));
    output.push_str(&format!("  Cost:     {}\n", zone.cost));
    output.push_str(&format!(
        "  Active:   {}\n",
        if zone.active { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Updated:  {}\n",
        zone.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
