//! Storage initialization
//!
//! Handles first-run setup and the seed data every fresh install starts
//! with: ten Santiago de Cuba delivery zones and the base novela catalog.

use chrono::{DateTime, Utc};

use crate::config::paths::CartaPaths;
use crate::config::settings::Settings;
use crate::error::CartaResult;
use crate::models::{
    AdminState, DeliveryZone, Money, NewNovela, Novela, NovelaId, PriceConfig, ZoneId,
};

use super::file::FileStorage;
use super::snapshot::{save_snapshot, ADMIN_DATA_KEY};
use super::SnapshotStorage;

const BASE_ZONE_PREFIX: &str = "Santiago de Cuba > Santiago de Cuba > ";

/// Seeded neighbourhoods and their delivery cost in CUP
const BASE_ZONES: [(&str, i64); 10] = [
    ("Nuevo Vista Alegre", 100),
    ("Vista Alegre", 300),
    ("Reparto Sueño", 250),
    ("San Pedrito", 150),
    ("Altamira", 300),
    ("Micro 7, 8 , 9", 150),
    ("Alameda", 150),
    ("El Caney", 800),
    ("Quintero", 200),
    ("Marimon", 100),
];

/// Seeded catalog: title, genre, chapters, year
const BASE_NOVELAS: [(&str, &str, u32, i32); 50] = [
    ("Corazón Salvaje", "Drama/Romance", 185, 2009),
    ("La Usurpadora", "Drama/Melodrama", 98, 1998),
    ("María la del Barrio", "Drama/Romance", 73, 1995),
    ("Marimar", "Drama/Romance", 63, 1994),
    ("Rosalinda", "Drama/Romance", 80, 1999),
    ("La Madrastra", "Drama/Suspenso", 135, 2005),
    ("Rubí", "Drama/Melodrama", 115, 2004),
    ("Pasión de Gavilanes", "Drama/Romance", 188, 2003),
    ("Yo Soy Betty, la Fea", "Comedia/Romance", 335, 1999),
    ("El Cuerpo del Deseo", "Drama/Fantasía", 178, 2005),
    ("La Reina del Sur", "Drama/Acción", 63, 2011),
    ("Sin Senos Sí Hay Paraíso", "Drama/Acción", 91, 2016),
    ("El Señor de los Cielos", "Drama/Acción", 81, 2013),
    ("La Casa de las Flores", "Comedia/Drama", 33, 2018),
    ("Rebelde", "Drama/Musical", 440, 2004),
    ("Amigas y Rivales", "Drama/Romance", 185, 2001),
    ("Clase 406", "Drama/Juvenil", 344, 2002),
    ("Destilando Amor", "Drama/Romance", 171, 2007),
    ("Fuego en la Sangre", "Drama/Romance", 233, 2008),
    ("Teresa", "Drama/Melodrama", 152, 2010),
    ("Triunfo del Amor", "Drama/Romance", 176, 2010),
    ("Una Familia con Suerte", "Comedia/Drama", 357, 2011),
    ("Amores Verdaderos", "Drama/Romance", 181, 2012),
    ("De Que Te Quiero, Te Quiero", "Comedia/Romance", 181, 2013),
    ("Lo Que la Vida Me Robó", "Drama/Romance", 221, 2013),
    ("La Gata", "Drama/Romance", 135, 2014),
    ("Hasta el Fin del Mundo", "Drama/Romance", 177, 2014),
    ("Yo No Creo en los Hombres", "Drama/Romance", 142, 2014),
    ("La Malquerida", "Drama/Romance", 121, 2014),
    ("Antes Muerta que Lichita", "Comedia/Romance", 183, 2015),
    ("A Que No Me Dejas", "Drama/Romance", 153, 2015),
    ("Simplemente María", "Drama/Romance", 155, 2015),
    ("Tres Veces Ana", "Drama/Romance", 123, 2016),
    ("La Candidata", "Drama/Político", 60, 2016),
    ("Vino el Amor", "Drama/Romance", 143, 2016),
    ("La Doble Vida de Estela Carrillo", "Drama/Musical", 95, 2017),
    ("Mi Marido Tiene Familia", "Comedia/Drama", 175, 2017),
    ("La Piloto", "Drama/Acción", 80, 2017),
    ("Caer en Tentación", "Drama/Suspenso", 92, 2017),
    ("Por Amar Sin Ley", "Drama/Romance", 123, 2018),
    ("Amar a Muerte", "Drama/Fantasía", 190, 2018),
    ("Ringo", "Drama/Musical", 90, 2019),
    ("La Usurpadora (2019)", "Drama/Melodrama", 25, 2019),
    ("100 Días para Enamorarnos", "Comedia/Romance", 104, 2020),
    ("Te Doy la Vida", "Drama/Romance", 91, 2020),
    ("Como Tú No Hay 2", "Comedia/Romance", 120, 2020),
    ("La Desalmada", "Drama/Romance", 96, 2021),
    ("Si Nos Dejan", "Drama/Romance", 93, 2021),
    ("Vencer el Pasado", "Drama/Familia", 91, 2021),
    ("La Herencia", "Drama/Romance", 74, 2022),
];

/// The ten base delivery zones, `base-1` through `base-10`
pub fn base_zones(now: DateTime<Utc>) -> Vec<DeliveryZone> {
    BASE_ZONES
        .iter()
        .enumerate()
        .map(|(i, (neighbourhood, cost))| DeliveryZone {
            id: ZoneId::base(i + 1),
            name: format!("{}{}", BASE_ZONE_PREFIX, neighbourhood),
            cost: Money::from_pesos(*cost),
            active: true,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// The base novela catalog, ids 1 through 50, priced from `prices`
pub fn base_novelas(prices: &PriceConfig, now: DateTime<Utc>) -> Vec<Novela> {
    BASE_NOVELAS
        .iter()
        .enumerate()
        .map(|(i, (title, genre, chapters, year))| {
            Novela::from_new(
                NovelaId::new(i as i64 + 1),
                NewNovela::priced(*title, *genre, *chapters, *year, prices),
                now,
            )
        })
        .collect()
}

/// A fresh admin state: default prices, base zones and base catalog
pub fn default_state(now: DateTime<Utc>) -> AdminState {
    let prices = PriceConfig::default();
    AdminState {
        zones: base_zones(now),
        novelas: base_novelas(&prices, now),
        prices,
        ..Default::default()
    }
}

/// Initialize storage for a fresh installation
///
/// Creates the directory layout, default settings and the seed snapshot.
/// Existing files are left untouched. Returns whether anything was created.
pub fn initialize_storage(paths: &CartaPaths) -> CartaResult<bool> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    let storage = FileStorage::new(paths.data_dir());
    if storage.read(ADMIN_DATA_KEY)?.is_none() {
        save_snapshot(&storage, &default_state(Utc::now()))?;
        created = true;
    }

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &CartaPaths) -> bool {
    !paths.settings_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_zones() {
        let zones = base_zones(Utc::now());
        assert_eq!(zones.len(), 10);
        assert_eq!(zones[0].id, ZoneId::base(1));
        assert_eq!(zones[7].short_name(), "El Caney");
        assert_eq!(zones[7].cost, Money::from_pesos(800));
        assert!(zones.iter().all(|z| z.path().len() == 3));
    }

    #[test]
    fn test_base_novelas_are_priced() {
        let novelas = base_novelas(&PriceConfig::default(), Utc::now());
        assert_eq!(novelas.len(), 50);
        assert_eq!(novelas[0].id, NovelaId::new(1));
        assert_eq!(novelas[49].id, NovelaId::new(50));

        let teresa = &novelas[19];
        assert_eq!(teresa.title, "Teresa");
        assert_eq!(teresa.cash_price, Money::from_pesos(760));
        assert_eq!(teresa.transfer_price, Money::from_pesos(836));
    }

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CartaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        assert!(initialize_storage(&paths).unwrap());
        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().join("adminData.json").exists());

        // second run is a no-op
        assert!(!initialize_storage(&paths).unwrap());
    }
}
