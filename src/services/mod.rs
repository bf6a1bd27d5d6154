//! Service layer
//!
//! The config store and the read-only views and bridges built on top of
//! the admin state.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod clock;
pub mod commands;
pub mod store;

pub use auth::Authenticator;
pub use cart::{add_or_toggle, line_item, CartCollaborator, ToggleOutcome};
pub use catalog::{CatalogQuery, CatalogStats, SortKey};
pub use clock::{Clock, FixedClock, MonotonicClock, SystemClock};
pub use commands::{AdminCommand, CommandOutcome};
pub use store::ConfigStore;
