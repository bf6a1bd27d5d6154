//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for the admin configuration.

pub mod cart;
pub mod notification;
pub mod novela;
pub mod prices;
pub mod zone;

pub use cart::format_cart;
pub use notification::format_notifications;
pub use novela::{format_catalog_stats, format_novela_details, format_novela_list};
pub use prices::format_prices;
pub use zone::{format_zone_details, format_zone_list};
