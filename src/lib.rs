//! carta-admin - admin core of the TV a la Carta storefront
//!
//! This library holds the storefront's configuration state (prices,
//! delivery zones and the novela catalog), the views derived from it and
//! the export of the whole configuration as a downloadable backup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths and settings
//! - `error`: Custom error types
//! - `models`: Prices, zones, novelas, notifications, cart lines
//! - `storage`: Snapshot persistence and the seed data
//! - `services`: The config store, catalog view and cart bridge
//! - `audit`: Change history mirrored to disk
//! - `export`: System export (archive, JSON, YAML, CSV)
//! - `backup`: Listing, retention and restore of exports
//! - `crypto`: Admin password hashing
//!
//! # Example
//!
//! ```rust,ignore
//! use carta_admin::config::{CartaPaths, Settings};
//! use carta_admin::services::{Authenticator, ConfigStore};
//! use carta_admin::storage::FileStorage;
//!
//! let paths = CartaPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let auth = Authenticator::from_settings(&settings.admin)?;
//! let mut store = ConfigStore::open(Box::new(FileStorage::new(paths.data_dir())), auth);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CartaError, CartaResult};
