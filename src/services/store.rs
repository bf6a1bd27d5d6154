//! Config store
//!
//! Owns the admin state and is the only place it changes. Every command
//! builds a new state from the current one, records exactly one
//! notification, publishes the result as a fresh `Arc<AdminState>` and
//! writes the persisted snapshot. Snapshots handed out earlier are never
//! touched.
//!
//! Commands never fail from the caller's point of view: unknown ids,
//! invalid payloads and storage problems all degrade to a notification or
//! a `tracing` event, and the returned [`CommandOutcome`] says what
//! happened.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, error, warn};

use crate::audit::{describe_changes, AuditLogger};
use crate::models::{
    AdminState, DeliveryZone, NewNovela, NewZone, Notification, NotificationKind,
    NotificationLog, Novela, NovelaId, NovelaUpdate, PriceConfig, Section, ZoneId, ZoneUpdate,
};
use crate::storage::{default_state, load_snapshot, save_snapshot, PersistedSnapshot, SnapshotStorage};

use super::auth::Authenticator;
use super::clock::MonotonicClock;
use super::commands::{AdminCommand, CommandOutcome};

/// Placeholder name used when a command targets an id that doesn't exist
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Notification content before it is stamped with an id and time
struct Notice {
    kind: NotificationKind,
    section: Section,
    action: &'static str,
    title: &'static str,
    message: String,
}

impl Notice {
    fn new(
        kind: NotificationKind,
        section: Section,
        action: &'static str,
        title: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            section,
            action,
            title,
            message: message.into(),
        }
    }

    fn stamp(self, at: DateTime<Utc>) -> Notification {
        Notification::new(self.kind, self.section, self.action, self.title, self.message, at)
    }
}

/// The admin state holder
pub struct ConfigStore {
    state: Arc<AdminState>,
    storage: Box<dyn SnapshotStorage>,
    clock: MonotonicClock,
    auth: Authenticator,
    audit: Option<AuditLogger>,
}

impl ConfigStore {
    /// Open a store over `storage` using the system clock
    ///
    /// The persisted snapshot, if any, is merged over the defaults.
    pub fn open(storage: Box<dyn SnapshotStorage>, auth: Authenticator) -> Self {
        Self::open_with_clock(storage, auth, MonotonicClock::system())
    }

    /// Open a store with an explicit clock
    pub fn open_with_clock(
        storage: Box<dyn SnapshotStorage>,
        auth: Authenticator,
        mut clock: MonotonicClock,
    ) -> Self {
        let mut state = default_state(clock.tick());
        if let Some(snapshot) = load_snapshot(storage.as_ref()) {
            snapshot.merge_into(&mut state);
        }
        observe_state(&mut clock, &state);

        Self {
            state: Arc::new(state),
            storage,
            clock,
            auth,
            audit: None,
        }
    }

    /// Mirror every notification into an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Execute one command
    pub fn execute(&mut self, command: AdminCommand) -> CommandOutcome {
        debug!(command = command.name(), "executing admin command");

        let now = self.clock.tick();
        let mut next = AdminState::clone(&self.state);
        let (outcome, notice) = self.apply(&mut next, command, now);

        let notification = notice.stamp(now);
        next.notifications.push(notification.clone());
        self.state = Arc::new(next);

        self.mirror(&notification);
        self.persist();
        outcome
    }

    fn apply(
        &mut self,
        state: &mut AdminState,
        command: AdminCommand,
        now: DateTime<Utc>,
    ) -> (CommandOutcome, Notice) {
        use NotificationKind::*;

        match command {
            AdminCommand::Login { username, password } => {
                if self.auth.verify(&username, &password) {
                    state.is_authenticated = true;
                    (
                        CommandOutcome::Applied,
                        Notice::new(
                            Success,
                            Section::Authentication,
                            "Login",
                            "Access Granted",
                            "Admin session started",
                        ),
                    )
                } else {
                    (
                        CommandOutcome::Denied,
                        Notice::new(
                            Error,
                            Section::Authentication,
                            "Login Failed",
                            "Access Denied",
                            "Invalid credentials",
                        ),
                    )
                }
            }

            AdminCommand::Logout => {
                state.is_authenticated = false;
                (
                    CommandOutcome::Applied,
                    Notice::new(
                        Info,
                        Section::Authentication,
                        "Logout",
                        "Session Closed",
                        "Admin session closed",
                    ),
                )
            }

            AdminCommand::SetPrices(prices) => {
                if let Err(e) = prices.validate() {
                    return rejected(Section::Prices, "Update Prices", "Invalid Prices", e);
                }
                let message = prices.summary();
                state.prices = prices;
                (
                    CommandOutcome::Applied,
                    Notice::new(Success, Section::Prices, "Update Prices", "Prices Updated", message),
                )
            }

            AdminCommand::AddZone(new_zone) => {
                if let Err(e) = new_zone.validate() {
                    return rejected(Section::Zones, "Add Zone", "Invalid Zone", e);
                }
                let zone = DeliveryZone::from_new(
                    ZoneId::from_millis(now.timestamp_millis()),
                    new_zone,
                    now,
                );
                let message = format!("New delivery zone: {}", zone);
                state.zones.push(zone);
                (
                    CommandOutcome::Applied,
                    Notice::new(Success, Section::Zones, "Add Zone", "Zone Added", message),
                )
            }

            AdminCommand::UpdateZone(update) => {
                if let Err(e) = update.validate() {
                    return rejected(Section::Zones, "Update Zone", "Invalid Zone", e);
                }
                match state.zones.iter_mut().find(|zone| zone.id == update.id) {
                    Some(zone) => {
                        let before = zone.clone();
                        zone.apply(&update, now);
                        let message = with_changes(format!("Zone updated: {}", zone.name), &before, &*zone);
                        (
                            CommandOutcome::Applied,
                            Notice::new(Success, Section::Zones, "Update Zone", "Zone Updated", message),
                        )
                    }
                    None => (
                        CommandOutcome::Missing,
                        Notice::new(
                            Warning,
                            Section::Zones,
                            "Update Zone",
                            "Zone Updated",
                            format!("Zone updated: {} (id {})", UNKNOWN_LABEL, update.id),
                        ),
                    ),
                }
            }

            AdminCommand::RemoveZone(id) => {
                let removed = remove_by(&mut state.zones, |zone| zone.id == id);
                let name = removed.as_ref().map_or(UNKNOWN_LABEL, |zone| zone.name.as_str());
                let outcome = if removed.is_some() {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Missing
                };
                (
                    outcome,
                    Notice::new(
                        Warning,
                        Section::Zones,
                        "Delete Zone",
                        "Zone Removed",
                        format!("Zone removed: {}", name),
                    ),
                )
            }

            AdminCommand::AddNovela(new_novela) => {
                if let Err(e) = new_novela.validate() {
                    return rejected(Section::Novelas, "Add Novela", "Invalid Novela", e);
                }
                let novela = Novela::from_new(NovelaId::new(now.timestamp_millis()), new_novela, now);
                let message = format!("New novela: {} ({} chapters)", novela.title, novela.chapters);
                state.novelas.push(novela);
                (
                    CommandOutcome::Applied,
                    Notice::new(Success, Section::Novelas, "Add Novela", "Novela Added", message),
                )
            }

            AdminCommand::UpdateNovela(update) => {
                if let Err(e) = update.validate() {
                    return rejected(Section::Novelas, "Update Novela", "Invalid Novela", e);
                }
                match state.novelas.iter_mut().find(|novela| novela.id == update.id) {
                    Some(novela) => {
                        let before = novela.clone();
                        novela.apply(&update, now);
                        let message =
                            with_changes(format!("Novela updated: {}", novela.title), &before, &*novela);
                        (
                            CommandOutcome::Applied,
                            Notice::new(
                                Success,
                                Section::Novelas,
                                "Update Novela",
                                "Novela Updated",
                                message,
                            ),
                        )
                    }
                    None => (
                        CommandOutcome::Missing,
                        Notice::new(
                            Warning,
                            Section::Novelas,
                            "Update Novela",
                            "Novela Updated",
                            format!("Novela updated: {} (id {})", UNKNOWN_LABEL, update.id),
                        ),
                    ),
                }
            }

            AdminCommand::RemoveNovela(id) => {
                let removed = remove_by(&mut state.novelas, |novela| novela.id == id);
                let title = removed.as_ref().map_or(UNKNOWN_LABEL, |novela| novela.title.as_str());
                let outcome = if removed.is_some() {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Missing
                };
                (
                    outcome,
                    Notice::new(
                        Warning,
                        Section::Novelas,
                        "Delete Novela",
                        "Novela Removed",
                        format!("Novela removed: {}", title),
                    ),
                )
            }

            AdminCommand::ClearNotifications => {
                state.notifications.clear();
                (
                    CommandOutcome::Applied,
                    Notice::new(
                        Info,
                        Section::Notifications,
                        "Clear Notifications",
                        "Notifications Cleared",
                        "Notification history cleared",
                    ),
                )
            }

            AdminCommand::RecordBackup { at, documents } => {
                state.last_backup = Some(at);
                (
                    CommandOutcome::Applied,
                    Notice::new(
                        Success,
                        Section::System,
                        "Export",
                        "System Exported",
                        format!(
                            "Full system export with {} documents: {}",
                            documents.len(),
                            documents.join(", ")
                        ),
                    ),
                )
            }

            AdminCommand::Restore(snapshot) => {
                snapshot.merge_into(state);
                observe_state(&mut self.clock, state);
                (
                    CommandOutcome::Applied,
                    Notice::new(
                        Info,
                        Section::System,
                        "Restore",
                        "Data Restored",
                        format!(
                            "Restored {} zones and {} novelas",
                            state.zones.len(),
                            state.novelas.len()
                        ),
                    ),
                )
            }
        }
    }

    fn mirror(&self, notification: &Notification) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(notification) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = save_snapshot(self.storage.as_ref(), &self.state) {
            error!(error = %e, "failed to persist admin snapshot");
        }
    }

    // Convenience commands

    /// Check credentials; `true` and an authenticated session on success
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        self.execute(AdminCommand::Login {
            username: username.to_string(),
            password: password.into(),
        })
        .is_applied()
    }

    pub fn logout(&mut self) {
        self.execute(AdminCommand::Logout);
    }

    pub fn set_prices(&mut self, prices: PriceConfig) -> CommandOutcome {
        self.execute(AdminCommand::SetPrices(prices))
    }

    /// Add a zone, returning it as stored
    pub fn add_zone(&mut self, zone: NewZone) -> Option<DeliveryZone> {
        if self.execute(AdminCommand::AddZone(zone)).is_applied() {
            self.state.zones.last().cloned()
        } else {
            None
        }
    }

    pub fn update_zone(&mut self, update: ZoneUpdate) -> CommandOutcome {
        self.execute(AdminCommand::UpdateZone(update))
    }

    pub fn remove_zone(&mut self, id: &ZoneId) -> CommandOutcome {
        self.execute(AdminCommand::RemoveZone(id.clone()))
    }

    /// Add a novela, returning it as stored
    pub fn add_novela(&mut self, novela: NewNovela) -> Option<Novela> {
        if self.execute(AdminCommand::AddNovela(novela)).is_applied() {
            self.state.novelas.last().cloned()
        } else {
            None
        }
    }

    pub fn update_novela(&mut self, update: NovelaUpdate) -> CommandOutcome {
        self.execute(AdminCommand::UpdateNovela(update))
    }

    pub fn remove_novela(&mut self, id: NovelaId) -> CommandOutcome {
        self.execute(AdminCommand::RemoveNovela(id))
    }

    pub fn clear_notifications(&mut self) {
        self.execute(AdminCommand::ClearNotifications);
    }

    pub fn record_backup(&mut self, at: DateTime<Utc>, documents: Vec<String>) {
        self.execute(AdminCommand::RecordBackup { at, documents });
    }

    pub fn restore(&mut self, snapshot: PersistedSnapshot) {
        self.execute(AdminCommand::Restore(snapshot));
    }

    /// Record a notification that isn't tied to a state change
    pub fn notify_export_failure(&mut self, reason: &str) {
        let now = self.clock.tick();
        let notification = Notice::new(
            NotificationKind::Error,
            Section::System,
            "Export Failed",
            "Export Error",
            format!("System export failed: {}", reason),
        )
        .stamp(now);

        let mut next = AdminState::clone(&self.state);
        next.notifications.push(notification.clone());
        self.state = Arc::new(next);
        self.mirror(&notification);
    }

    // Queries

    /// Current state snapshot
    pub fn state(&self) -> Arc<AdminState> {
        Arc::clone(&self.state)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn prices(&self) -> &PriceConfig {
        &self.state.prices
    }

    pub fn zones(&self) -> &[DeliveryZone] {
        &self.state.zones
    }

    pub fn active_zones(&self) -> Vec<&DeliveryZone> {
        self.state.active_zones().collect()
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&DeliveryZone> {
        self.state.zone(id)
    }

    pub fn novelas(&self) -> &[Novela] {
        &self.state.novelas
    }

    pub fn novela(&self, id: NovelaId) -> Option<&Novela> {
        self.state.novela(id)
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.state.notifications
    }

    pub fn last_backup(&self) -> Option<DateTime<Utc>> {
        self.state.last_backup
    }
}

fn rejected(
    section: Section,
    action: &'static str,
    title: &'static str,
    reason: impl std::fmt::Display,
) -> (CommandOutcome, Notice) {
    let reason = reason.to_string();
    (
        CommandOutcome::Rejected(reason.clone()),
        Notice::new(NotificationKind::Error, section, action, title, reason),
    )
}

fn with_changes<T: serde::Serialize>(message: String, before: &T, after: &T) -> String {
    match describe_changes(before, after) {
        Some(changes) => format!("{} ({})", message, changes),
        None => message,
    }
}

fn remove_by<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(matches)?;
    Some(items.remove(index))
}

/// Advance the clock past every timestamp and millisecond id in the state
fn observe_state(clock: &mut MonotonicClock, state: &AdminState) {
    for zone in &state.zones {
        clock.observe(zone.updated_at);
        if let Ok(millis) = zone.id.as_str().parse::<i64>() {
            if let Some(at) = Utc.timestamp_millis_opt(millis).single() {
                clock.observe(at);
            }
        }
    }
    for novela in &state.novelas {
        clock.observe(novela.updated_at);
        if let Some(at) = Utc.timestamp_millis_opt(novela.id.value()).single() {
            clock.observe(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NOTIFICATION_CAPACITY};
    use crate::services::clock::FixedClock;
    use crate::error::{CartaError, CartaResult};
    use crate::storage::{MemoryStorage, ADMIN_DATA_KEY};
    use serde_json::{json, Value};
    use std::rc::Rc;

    /// Storage shared between the store under test and the assertions
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<MemoryStorage>);

    impl SnapshotStorage for SharedStorage {
        fn read(&self, key: &str) -> CartaResult<Option<Value>> {
            self.0.read(key)
        }

        fn write(&self, key: &str, value: &Value) -> CartaResult<()> {
            self.0.write(key, value)
        }
    }

    struct BrokenStorage;

    impl SnapshotStorage for BrokenStorage {
        fn read(&self, _key: &str) -> CartaResult<Option<Value>> {
            Err(CartaError::Storage("disk unavailable".into()))
        }

        fn write(&self, _key: &str, _value: &Value) -> CartaResult<()> {
            Err(CartaError::Storage("quota exceeded".into()))
        }
    }

    fn frozen_clock() -> MonotonicClock {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        MonotonicClock::new(Box::new(FixedClock(at)))
    }

    fn store_over(storage: impl SnapshotStorage + 'static) -> ConfigStore {
        ConfigStore::open_with_clock(
            Box::new(storage),
            Authenticator::default_credentials().unwrap(),
            frozen_clock(),
        )
    }

    fn new_store() -> ConfigStore {
        store_over(MemoryStorage::new())
    }

    #[test]
    fn test_opens_with_seed_data() {
        let store = new_store();
        assert_eq!(store.zones().len(), 10);
        assert_eq!(store.novelas().len(), 50);
        assert_eq!(store.prices(), &PriceConfig::default());
        assert!(!store.is_authenticated());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_login_scenarios() {
        let mut store = new_store();

        assert!(!store.login("wrong", "wrong"));
        assert!(!store.is_authenticated());
        assert_eq!(store.notifications().latest().unwrap().kind, NotificationKind::Error);

        assert!(store.login("root", "video"));
        assert!(store.is_authenticated());
        assert_eq!(store.notifications().latest().unwrap().kind, NotificationKind::Success);

        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(store.notifications().len(), 3);
    }

    #[test]
    fn test_update_zone_scenario() {
        let mut store = new_store();
        let zone = store
            .add_zone(NewZone::new("X", Money::from_pesos(100)))
            .unwrap();

        let outcome = store.update_zone(ZoneUpdate::new(zone.id.clone()).cost(Money::from_pesos(150)));
        assert_eq!(outcome, CommandOutcome::Applied);

        let updated = store.zone(&zone.id).unwrap();
        assert_eq!(updated.cost, Money::from_pesos(150));
        assert_eq!(updated.name, "X");
        assert_eq!(updated.id, zone.id);
        assert!(updated.updated_at > updated.created_at);

        let message = &store.notifications().latest().unwrap().message;
        assert!(message.contains("cost: 100 -> 150"));
    }

    #[test]
    fn test_zone_sequence_matches_adds_minus_removes() {
        let mut store = new_store();
        let a = store.add_zone(NewZone::new("A", Money::from_pesos(10))).unwrap();
        let b = store.add_zone(NewZone::new("B", Money::from_pesos(20))).unwrap();
        let c = store.add_zone(NewZone::new("C", Money::from_pesos(30))).unwrap();

        assert_ne!(a.id, b.id);
        store.remove_zone(&b.id);
        store.update_zone(ZoneUpdate::new(c.id.clone()).name("C2"));
        store.remove_zone(&ZoneId::base(1));

        let names: Vec<_> = store.zones()[9..].iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C2"]);
        assert_eq!(store.zones().len(), 11);
        assert!(store.zone(&ZoneId::base(1)).is_none());
    }

    #[test]
    fn test_unknown_ids_are_logged_no_ops() {
        let mut store = new_store();
        let before = store.state();

        let missing = ZoneId::new("nope");
        assert_eq!(store.remove_zone(&missing), CommandOutcome::Missing);
        let latest = store.notifications().latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Warning);
        assert!(latest.message.contains(UNKNOWN_LABEL));

        assert_eq!(
            store.update_novela(NovelaUpdate::new(NovelaId::new(999)).chapters(3)),
            CommandOutcome::Missing
        );
        assert!(store.notifications().latest().unwrap().message.contains(UNKNOWN_LABEL));

        assert_eq!(store.zones(), before.zones.as_slice());
        assert_eq!(store.novelas(), before.novelas.as_slice());
    }

    #[test]
    fn test_invalid_prices_rejected() {
        let mut store = new_store();
        let mut prices = PriceConfig::default();
        prices.transfer_fee_percentage = 150.0;

        let outcome = store.set_prices(prices);
        assert!(matches!(outcome, CommandOutcome::Rejected(_)));
        assert_eq!(store.prices(), &PriceConfig::default());
        assert_eq!(store.notifications().latest().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_invalid_novela_rejected() {
        let mut store = new_store();
        let novela = NewNovela::priced("Vacía", "Drama", 0, 2020, &PriceConfig::default());

        assert!(store.add_novela(novela).is_none());
        assert_eq!(store.novelas().len(), 50);
    }

    #[test]
    fn test_earlier_snapshots_never_change() {
        let mut store = new_store();
        let before = store.state();

        store.add_zone(NewZone::new("Nueva", Money::from_pesos(90)));
        store.set_prices(PriceConfig {
            movie_price: Money::from_pesos(100),
            ..PriceConfig::default()
        });

        assert_eq!(before.zones.len(), 10);
        assert_eq!(before.prices, PriceConfig::default());
        assert!(before.notifications.is_empty());
        assert_eq!(store.state().zones.len(), 11);
    }

    #[test]
    fn test_every_command_persists() {
        let storage = SharedStorage::default();
        let mut store = store_over(storage.clone());

        store.add_zone(NewZone::new("Persistida", Money::from_pesos(60)));

        let saved = storage.0.read(ADMIN_DATA_KEY).unwrap().unwrap();
        assert_eq!(saved["deliveryZones"].as_array().unwrap().len(), 11);
        assert_eq!(saved["prices"]["moviePrice"], 80);
        assert!(saved.get("notifications").is_none());

        // a second store over the same storage sees the change
        let reopened = store_over(storage);
        assert_eq!(reopened.zones().len(), 11);
    }

    #[test]
    fn test_free_novela_round_trips_through_storage() {
        let storage = SharedStorage::default();
        let mut store = store_over(storage.clone());
        let gratis = store
            .add_novela(NewNovela::new("Gratis", "Drama", 10, 2020, Money::zero(), Money::zero()))
            .unwrap();
        let snapshot = PersistedSnapshot::from_state(&store.state());

        let reopened = store_over(storage);

        assert_eq!(PersistedSnapshot::from_state(&reopened.state()), snapshot);
        let reloaded = reopened.novela(gratis.id).unwrap();
        assert!(reloaded.cash_price.is_zero());
        assert!(reloaded.transfer_price.is_zero());
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_defaults() {
        let storage = MemoryStorage::with_entry(ADMIN_DATA_KEY, json!("garbage"));
        let store = store_over(storage);

        assert_eq!(store.zones().len(), 10);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_storage_failures_do_not_block_commands() {
        let mut store = store_over(BrokenStorage);
        assert_eq!(store.novelas().len(), 50);

        let zone = store.add_zone(NewZone::new("Sin disco", Money::from_pesos(10)));
        assert!(zone.is_some());
        assert_eq!(store.zones().len(), 11);
    }

    #[test]
    fn test_notifications_capped() {
        let mut store = new_store();
        for _ in 0..60 {
            store.logout();
        }
        store.login("root", "video");

        assert_eq!(store.notifications().len(), NOTIFICATION_CAPACITY);
        assert_eq!(store.notifications().latest().unwrap().action, "Login");
    }

    #[test]
    fn test_clear_notifications_leaves_one_entry() {
        let mut store = new_store();
        store.login("root", "video");
        store.clear_notifications();

        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications().latest().unwrap().kind, NotificationKind::Info);
    }

    #[test]
    fn test_restore_merges_present_fields() {
        let mut store = new_store();
        let mut prices = PriceConfig::default();
        prices.series_price = Money::from_pesos(250);

        store.restore(PersistedSnapshot {
            prices: Some(prices.clone()),
            delivery_zones: Some(vec![]),
            ..Default::default()
        });

        assert_eq!(store.prices(), &prices);
        assert!(store.zones().is_empty());
        assert_eq!(store.novelas().len(), 50);
    }

    #[test]
    fn test_new_ids_follow_restored_ids() {
        let mut store = new_store();
        let far_future = Utc.timestamp_millis_opt(1_900_000_000_000).unwrap();
        let mut zone = store.zones()[0].clone();
        zone.id = ZoneId::from_millis(far_future.timestamp_millis());

        store.restore(PersistedSnapshot {
            delivery_zones: Some(vec![zone.clone()]),
            ..Default::default()
        });
        let added = store.add_zone(NewZone::new("Después", Money::from_pesos(5))).unwrap();

        assert_ne!(added.id, zone.id);
        assert!(added.created_at > far_future);
    }

    #[test]
    fn test_record_backup() {
        let mut store = new_store();
        let at = Utc::now();
        store.record_backup(at, vec!["README.md".into()]);

        assert_eq!(store.last_backup(), Some(at));
        assert!(store.notifications().latest().unwrap().message.contains("README.md"));
    }

    #[test]
    fn test_audit_mirror() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = new_store().with_audit(logger.clone());

        store.login("root", "video");
        store.remove_novela(NovelaId::new(1));

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].message, "Novela removed: Corazón Salvaje");
    }
}
