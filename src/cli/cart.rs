//! Cart CLI commands
//!
//! The cart is the storefront side: no admin login is needed. It is kept
//! next to the admin snapshot under the `cart` key.

use clap::Subcommand;

use crate::display::format_cart;
use crate::error::{CartaError, CartaResult};
use crate::models::{Cart, NovelaId, PaymentType};
use crate::services::{add_or_toggle, ToggleOutcome};
use crate::storage::SnapshotStorage;

use super::CliContext;

/// Storage key of the cart
pub const CART_KEY: &str = "cart";

/// Cart subcommands
#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart
    Show,
    /// Add a novela to the cart, or take it out if it is already there
    Toggle {
        /// Novela ID
        novela_id: NovelaId,
        /// cash or transfer
        #[arg(short, long, default_value = "cash")]
        payment: PaymentType,
    },
    /// Empty the cart
    Clear,
}

fn load_cart(storage: &dyn SnapshotStorage) -> CartaResult<Cart> {
    match storage.read(CART_KEY)? {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| CartaError::Storage(format!("Invalid cart: {}", e))),
        None => Ok(Cart::new()),
    }
}

fn save_cart(storage: &dyn SnapshotStorage, cart: &Cart) -> CartaResult<()> {
    storage.write(CART_KEY, &serde_json::to_value(cart)?)
}

/// Handle a cart command
pub fn handle_cart_command(ctx: &CliContext, cmd: CartCommands) -> CartaResult<()> {
    let storage = ctx.storage();

    match cmd {
        CartCommands::Show => {
            let cart = load_cart(&storage)?;
            print!("{}", format_cart(&cart));
        }

        CartCommands::Toggle { novela_id, payment } => {
            let store = ctx.open_store()?;
            let novela = store
                .novela(novela_id)
                .ok_or_else(|| CartaError::novela_not_found(novela_id.to_string()))?;

            let mut cart = load_cart(&storage)?;
            let outcome = add_or_toggle(&mut cart, novela, payment);
            save_cart(&storage, &cart)?;

            match outcome {
                ToggleOutcome::Added => println!("Added to cart: {}", novela),
                ToggleOutcome::Removed => println!("Removed from cart: {}", novela),
            }
            println!("Cart total: {}", cart.total());
        }

        CartCommands::Clear => {
            let mut cart = load_cart(&storage)?;
            cart.clear();
            save_cart(&storage, &cart)?;
            println!("Cart cleared.");
        }
    }

    Ok(())
}
