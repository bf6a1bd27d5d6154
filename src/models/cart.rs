//! Cart line items and the local cart
//!
//! A cart line is a value copy of a catalog item taken at add-to-cart time.
//! It keeps no reference to the novela it came from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CartItemId;
use super::money::Money;

/// How the customer pays for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Cash,
    Transfer,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(Self::Cash),
            "transfer" | "transferencia" => Ok(Self::Transfer),
            other => Err(format!("Unknown payment type: {}", other)),
        }
    }
}

/// Kind of catalog item a cart line was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartItemKind {
    Movie,
    Tv,
    Novel,
}

/// A line in the shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: CartItemId,

    #[serde(rename = "type")]
    pub kind: CartItemKind,

    pub title: String,
    pub genre: String,
    pub year: i32,
    pub chapters: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub cash_price: Money,
    pub transfer_price: Money,
    pub payment_type: PaymentType,
}

impl CartLineItem {
    /// The price that applies under the line's payment type
    pub fn price(&self) -> Money {
        match self.payment_type {
            PaymentType::Cash => self.cash_price,
            PaymentType::Transfer => self.transfer_price,
        }
    }
}

/// The local cart, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: CartItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of every line's applicable price
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::price).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, payment_type: PaymentType) -> CartLineItem {
        CartLineItem {
            id: CartItemId::new(id),
            kind: CartItemKind::Novel,
            title: "Teresa".into(),
            genre: "Drama/Melodrama".into(),
            year: 2010,
            chapters: 152,
            description: None,
            cash_price: Money::from_pesos(760),
            transfer_price: Money::from_pesos(836),
            payment_type,
        }
    }

    #[test]
    fn test_line_price_follows_payment_type() {
        assert_eq!(line(1, PaymentType::Cash).price(), Money::from_pesos(760));
        assert_eq!(line(1, PaymentType::Transfer).price(), Money::from_pesos(836));
    }

    #[test]
    fn test_cart_total() {
        let cart = Cart {
            items: vec![line(1, PaymentType::Cash), line(2, PaymentType::Transfer)],
        };
        assert_eq!(cart.total(), Money::from_pesos(1596));
        assert!(cart.get(CartItemId::new(2)).is_some());
        assert!(cart.get(CartItemId::new(3)).is_none());
    }

    #[test]
    fn test_payment_type_parsing() {
        assert_eq!("cash".parse::<PaymentType>().unwrap(), PaymentType::Cash);
        assert_eq!(
            "Transferencia".parse::<PaymentType>().unwrap(),
            PaymentType::Transfer
        );
        assert!("card".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(line(100_020, PaymentType::Cash)).unwrap();
        assert_eq!(json["id"], 100_020);
        assert_eq!(json["type"], "novel");
        assert_eq!(json["cashPrice"], 760);
        assert_eq!(json["paymentType"], "cash");
    }
}
