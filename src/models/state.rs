//! The admin state
//!
//! One value holding everything the admin panel configures. The store hands
//! out `Arc<AdminState>` snapshots; a snapshot never changes once shared.

use chrono::{DateTime, Utc};

use super::ids::{NovelaId, ZoneId};
use super::notification::NotificationLog;
use super::novela::Novela;
use super::prices::PriceConfig;
use super::zone::DeliveryZone;

/// Complete admin configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub is_authenticated: bool,
    pub prices: PriceConfig,

    /// Delivery zones in insertion order
    pub zones: Vec<DeliveryZone>,

    /// Catalog novelas in insertion order
    pub novelas: Vec<Novela>,

    pub notifications: NotificationLog,
    pub last_backup: Option<DateTime<Utc>>,
}

impl AdminState {
    pub fn zone(&self, id: &ZoneId) -> Option<&DeliveryZone> {
        self.zones.iter().find(|zone| &zone.id == id)
    }

    pub fn novela(&self, id: NovelaId) -> Option<&Novela> {
        self.novelas.iter().find(|novela| novela.id == id)
    }

    pub fn active_zones(&self) -> impl Iterator<Item = &DeliveryZone> {
        self.zones.iter().filter(|zone| zone.active)
    }

    pub fn active_novelas(&self) -> impl Iterator<Item = &Novela> {
        self.novelas.iter().filter(|novela| novela.active)
    }

    pub fn active_zone_count(&self) -> usize {
        self.active_zones().count()
    }

    pub fn active_novela_count(&self) -> usize {
        self.active_novelas().count()
    }
}
