//! Delivery zone CLI commands

use clap::Subcommand;

use crate::display::{format_zone_details, format_zone_list};
use crate::error::{CartaError, CartaResult};
use crate::models::{NewZone, ZoneId, ZoneUpdate};
use crate::services::CommandOutcome;

use super::prices::parse_money;
use super::CliContext;

/// Zone subcommands
#[derive(Subcommand)]
pub enum ZoneCommands {
    /// List delivery zones
    List {
        /// Only zones offered at checkout
        #[arg(short, long)]
        active: bool,
    },
    /// Add a delivery zone
    Add {
        /// Zone name, levels separated by " > "
        name: String,
        /// Delivery cost
        cost: String,
        /// Create the zone switched off
        #[arg(long)]
        inactive: bool,
    },
    /// Update a delivery zone
    Update {
        /// Zone ID
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        cost: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Remove a delivery zone
    Remove {
        /// Zone ID
        id: String,
    },
}

/// Handle a zone command
pub fn handle_zone_command(ctx: &CliContext, cmd: ZoneCommands) -> CartaResult<()> {
    match cmd {
        ZoneCommands::List { active } => {
            let store = ctx.open_store()?;
            let zones: Vec<_> = if active {
                store.active_zones()
            } else {
                store.zones().iter().collect()
            };
            print!("{}", format_zone_list(&zones));
        }

        ZoneCommands::Add {
            name,
            cost,
            inactive,
        } => {
            let mut new_zone = NewZone::new(name, parse_money("cost", &cost)?);
            new_zone.active = !inactive;

            let mut store = ctx.open_admin_store()?;
            match store.add_zone(new_zone) {
                Some(zone) => {
                    println!("Added zone:");
                    print!("{}", format_zone_details(&zone));
                }
                None => return Err(rejection(&store)),
            }
        }

        ZoneCommands::Update {
            id,
            name,
            cost,
            active,
            inactive,
        } => {
            let id = ZoneId::new(id);
            let mut update = ZoneUpdate::new(id.clone());
            if let Some(name) = name {
                update = update.name(name);
            }
            if let Some(cost) = cost {
                update = update.cost(parse_money("cost", &cost)?);
            }
            if active || inactive {
                update = update.active(active);
            }

            let mut store = ctx.open_admin_store()?;
            match store.update_zone(update) {
                CommandOutcome::Applied => {
                    if let Some(zone) = store.zone(&id) {
                        println!("Updated zone:");
                        print!("{}", format_zone_details(zone));
                    }
                }
                CommandOutcome::Missing => {
                    return Err(CartaError::zone_not_found(id.as_str()));
                }
                CommandOutcome::Rejected(reason) => return Err(CartaError::Validation(reason)),
                CommandOutcome::Denied => {
                    return Err(CartaError::Auth("not logged in".into()));
                }
            }
        }

        ZoneCommands::Remove { id } => {
            let id = ZoneId::new(id);
            let mut store = ctx.open_admin_store()?;
            match store.remove_zone(&id) {
                CommandOutcome::Missing => return Err(CartaError::zone_not_found(id.as_str())),
                _ => println!("Removed zone {}", id),
            }
        }
    }

    Ok(())
}

/// The reason of the last rejected command
pub(crate) fn rejection(store: &crate::services::ConfigStore) -> CartaError {
    let reason = store
        .notifications()
        .latest()
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "rejected".to_string());
    CartaError::Validation(reason)
}
