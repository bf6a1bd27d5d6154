//! CSV Export functionality
//!
//! Exports the novela catalog and the delivery zones to spreadsheet-friendly
//! CSV. Amounts are written in major units with two decimals.

use std::io::Write;

use serde::Serialize;

use crate::error::CartaResult;
use crate::models::{DeliveryZone, Money, Novela};

#[derive(Serialize)]
struct NovelaRow<'a> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Genre")]
    genre: &'a str,
    #[serde(rename = "Chapters")]
    chapters: u32,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Cash Price")]
    cash_price: String,
    #[serde(rename = "Transfer Price")]
    transfer_price: String,
    #[serde(rename = "Active")]
    active: bool,
}

#[derive(Serialize)]
struct ZoneRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Cost")]
    cost: String,
    #[serde(rename = "Active")]
    active: bool,
}

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_major_units())
}

/// Export the novela catalog to CSV
pub fn export_novelas_csv<W: Write>(novelas: &[Novela], writer: W) -> CartaResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for novela in novelas {
        csv.serialize(NovelaRow {
            id: novela.id.value(),
            title: &novela.title,
            genre: &novela.genre,
            chapters: novela.chapters,
            year: novela.year,
            cash_price: amount(novela.cash_price),
            transfer_price: amount(novela.transfer_price),
            active: novela.active,
        })?;
    }

    csv.flush()?;
    Ok(())
}

/// Export delivery zones to CSV
pub fn export_zones_csv<W: Write>(zones: &[DeliveryZone], writer: W) -> CartaResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for zone in zones {
        csv.serialize(ZoneRow {
            id: zone.id.as_str(),
            name: &zone.name,
            cost: amount(zone.cost),
            active: zone.active,
        })?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewNovela, NewZone, NovelaId, PriceConfig, ZoneId};
    use chrono::Utc;

    #[test]
    fn test_novelas_csv() {
        let novela = Novela::from_new(
            NovelaId::new(1),
            NewNovela::priced("Amor, Real", "Drama", 10, 2003, &PriceConfig::default()),
            Utc::now(),
        );

        let mut output = Vec::new();
        export_novelas_csv(&[novela], &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "ID,Title,Genre,Chapters,Year,Cash Price,Transfer Price,Active"
        );
        // comma in the title is quoted
        assert_eq!(lines[1], "1,\"Amor, Real\",Drama,10,2003,50.00,55.00,true");
    }

    #[test]
    fn test_zones_csv() {
        let zone = DeliveryZone::from_new(
            ZoneId::new("7"),
            NewZone::new("A > B > C", Money::from_cents(1250)),
            Utc::now(),
        );

        let mut output = Vec::new();
        export_zones_csv(&[zone], &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();

        assert!(csv.starts_with("ID,Name,Cost,Active\n"));
        assert!(csv.contains("7,A > B > C,12.50,true"));
    }

    #[test]
    fn test_empty_catalog_writes_nothing() {
        let mut output = Vec::new();
        export_novelas_csv(&[], &mut output).unwrap();
        assert!(output.is_empty());
    }
}
