//! Cart bridge
//!
//! Turns a catalog novela into a cart line and toggles it in and out of a
//! cart. Novela lines live in their own id band: line id = novela id +
//! [`NOVELA_CART_ID_OFFSET`], so they never collide with movie or series
//! ids sharing the same cart.
//!
//! [`NOVELA_CART_ID_OFFSET`]: crate::models::NOVELA_CART_ID_OFFSET

use crate::models::{Cart, CartItemId, CartItemKind, CartLineItem, Novela, PaymentType};

/// The cart operations the bridge relies on
pub trait CartCollaborator {
    fn add_item(&mut self, item: CartLineItem);
    fn remove_item(&mut self, id: CartItemId);
    fn is_in_cart(&self, id: CartItemId) -> bool;
}

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Build the cart line for a novela
pub fn line_item(novela: &Novela, payment: PaymentType) -> CartLineItem {
    CartLineItem {
        id: CartItemId::for_novela(novela.id),
        kind: CartItemKind::Novel,
        title: novela.title.clone(),
        genre: novela.genre.clone(),
        year: novela.year,
        chapters: novela.chapters,
        description: novela.description.clone(),
        cash_price: novela.cash_price,
        transfer_price: novela.transfer_price,
        payment_type: payment,
    }
}

/// Add the novela to the cart, or remove it if it is already there
pub fn add_or_toggle<C: CartCollaborator + ?Sized>(
    cart: &mut C,
    novela: &Novela,
    payment: PaymentType,
) -> ToggleOutcome {
    let id = CartItemId::for_novela(novela.id);
    if cart.is_in_cart(id) {
        cart.remove_item(id);
        ToggleOutcome::Removed
    } else {
        cart.add_item(line_item(novela, payment));
        ToggleOutcome::Added
    }
}

impl CartCollaborator for Cart {
    fn add_item(&mut self, item: CartLineItem) {
        if !self.is_in_cart(item.id) {
            self.items.push(item);
        }
    }

    fn remove_item(&mut self, id: CartItemId) {
        self.items.retain(|item| item.id != id);
    }

    fn is_in_cart(&self, id: CartItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}
