//! Novela catalog CLI commands

use clap::{Args, Subcommand};

use crate::display::{format_catalog_stats, format_novela_details, format_novela_list};
use crate::error::{CartaError, CartaResult};
use crate::models::{NewNovela, NovelaId, NovelaUpdate, PaymentType};
use crate::services::{catalog, CatalogQuery, CommandOutcome, SortKey};

use super::prices::parse_money;
use super::zone::rejection;
use super::CliContext;

/// Catalog filters shared by `list` and `stats`
#[derive(Args, Debug, Clone)]
pub struct CatalogFilter {
    /// Substring of the title or genre
    #[arg(short, long, default_value = "")]
    search: String,
    /// Exact genre, or "all"
    #[arg(short, long, default_value = catalog::ALL_GENRES)]
    genre: String,
    /// Include novelas switched off by the admin
    #[arg(short, long)]
    all: bool,
}

impl CatalogFilter {
    fn query(&self) -> CatalogQuery {
        CatalogQuery::new()
            .search(self.search.clone())
            .genre(self.genre.clone())
            .active_only(!self.all)
    }
}

/// Novela subcommands
#[derive(Subcommand)]
pub enum NovelaCommands {
    /// List the catalog
    List {
        #[command(flatten)]
        filter: CatalogFilter,
        /// Sort by title, year, chapters or price
        #[arg(long, default_value = "title")]
        sort: SortKey,
        /// Price column: cash or transfer
        #[arg(short, long, default_value = "cash")]
        payment: PaymentType,
    },
    /// Show a novela
    Show {
        /// Novela ID
        id: NovelaId,
    },
    /// Catalog statistics
    Stats {
        #[command(flatten)]
        filter: CatalogFilter,
    },
    /// Add a novela, priced per chapter unless prices are given
    Add {
        title: String,
        #[arg(short, long)]
        genre: String,
        #[arg(short, long)]
        chapters: u32,
        #[arg(short, long)]
        year: i32,
        #[arg(short, long)]
        description: Option<String>,
        /// Cash price
        #[arg(long)]
        cash: Option<String>,
        /// Transfer price
        #[arg(long)]
        transfer: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    /// Update a novela; a new chapter count reprices it unless prices are given
    Update {
        /// Novela ID
        id: NovelaId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        genre: Option<String>,
        #[arg(short, long)]
        chapters: Option<u32>,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        cash: Option<String>,
        #[arg(long)]
        transfer: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Remove a novela
    Remove {
        /// Novela ID
        id: NovelaId,
    },
}

/// Handle a novela command
pub fn handle_novela_command(ctx: &CliContext, cmd: NovelaCommands) -> CartaResult<()> {
    match cmd {
        NovelaCommands::List {
            filter,
            sort,
            payment,
        } => {
            let store = ctx.open_store()?;
            let query = filter.query().sort(sort).payment(payment);
            let listing = catalog::filter_and_sort(store.novelas(), &query);
            print!("{}", format_novela_list(&listing, payment));
        }

        NovelaCommands::Show { id } => {
            let store = ctx.open_store()?;
            let novela = store
                .novela(id)
                .ok_or_else(|| CartaError::novela_not_found(id.to_string()))?;
            print!("{}", format_novela_details(novela));
        }

        NovelaCommands::Stats { filter } => {
            let store = ctx.open_store()?;
            let stats = catalog::stats(store.novelas(), &filter.query());
            print!("{}", format_catalog_stats(&stats));
        }

        NovelaCommands::Add {
            title,
            genre,
            chapters,
            year,
            description,
            cash,
            transfer,
            inactive,
        } => {
            let mut store = ctx.open_admin_store()?;

            let mut new_novela = NewNovela::priced(title, genre, chapters, year, store.prices());
            if let Some(cash) = cash {
                new_novela.cash_price = parse_money("cash price", &cash)?;
            }
            if let Some(transfer) = transfer {
                new_novela.transfer_price = parse_money("transfer price", &transfer)?;
            }
            if let Some(description) = description {
                new_novela = new_novela.with_description(description);
            }
            new_novela.active = !inactive;

            match store.add_novela(new_novela) {
                Some(novela) => {
                    println!("Added novela:");
                    print!("{}", format_novela_details(&novela));
                }
                None => return Err(rejection(&store)),
            }
        }

        NovelaCommands::Update {
            id,
            title,
            genre,
            chapters,
            year,
            description,
            cash,
            transfer,
            active,
            inactive,
        } => {
            let mut store = ctx.open_admin_store()?;

            let mut update = NovelaUpdate::new(id);
            if let Some(title) = title {
                update = update.title(title);
            }
            if let Some(genre) = genre {
                update = update.genre(genre);
            }
            if let Some(year) = year {
                update = update.year(year);
            }
            if description.is_some() {
                update = update.description(description);
            }
            if let Some(chapters) = chapters {
                update = update
                    .chapters(chapters)
                    .cash_price(store.prices().novela_cash_price(chapters))
                    .transfer_price(store.prices().novela_transfer_price(chapters));
            }
            if let Some(cash) = cash {
                update = update.cash_price(parse_money("cash price", &cash)?);
            }
            if let Some(transfer) = transfer {
                update = update.transfer_price(parse_money("transfer price", &transfer)?);
            }
            if active || inactive {
                update = update.active(active);
            }

            match store.update_novela(update) {
                CommandOutcome::Missing => {
                    return Err(CartaError::novela_not_found(id.to_string()))
                }
                CommandOutcome::Rejected(reason) => return Err(CartaError::Validation(reason)),
                _ => {
                    if let Some(novela) = store.novela(id) {
                        println!("Updated novela:");
                        print!("{}", format_novela_details(novela));
                    }
                }
            }
        }

        NovelaCommands::Remove { id } => {
            let mut store = ctx.open_admin_store()?;
            match store.remove_novela(id) {
                CommandOutcome::Missing => {
                    return Err(CartaError::novela_not_found(id.to_string()))
                }
                _ => println!("Removed novela {}", id),
            }
        }
    }

    Ok(())
}
