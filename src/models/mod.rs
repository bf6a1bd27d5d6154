//! Core data models for the admin layer
//!
//! This module contains the data structures the storefront admin configures:
//! prices, delivery zones, the novela catalog, notifications and cart lines.

pub mod cart;
pub mod ids;
pub mod money;
pub mod notification;
pub mod novela;
pub mod prices;
pub mod state;
pub mod zone;

pub use cart::{Cart, CartItemKind, CartLineItem, PaymentType};
pub use ids::{CartItemId, NotificationId, NovelaId, ZoneId, NOVELA_CART_ID_OFFSET};
pub use money::Money;
pub use notification::{
    Notification, NotificationKind, NotificationLog, Section, NOTIFICATION_CAPACITY,
};
pub use novela::{NewNovela, Novela, NovelaUpdate, NovelaValidationError};
pub use prices::{PriceConfig, PriceValidationError};
pub use state::AdminState;
pub use zone::{DeliveryZone, NewZone, ZoneUpdate, ZoneValidationError};
