//! Price CLI commands

use clap::Subcommand;

use crate::display::format_prices;
use crate::error::{CartaError, CartaResult};
use crate::models::Money;
use crate::services::CommandOutcome;

use super::CliContext;

/// Price subcommands
#[derive(Subcommand)]
pub enum PricesCommands {
    /// Show the current price list
    Show,
    /// Change one or more prices
    Set {
        /// Price of a movie (e.g., "80" or "79.50")
        #[arg(long)]
        movie: Option<String>,
        /// Price of a series season
        #[arg(long)]
        series: Option<String>,
        /// Bank transfer surcharge in percent
        #[arg(long)]
        transfer_fee: Option<f64>,
        /// Price of a novela chapter
        #[arg(long)]
        per_chapter: Option<String>,
    },
}

pub(crate) fn parse_money(field: &str, value: &str) -> CartaResult<Money> {
    value.parse::<Money>().map_err(|e| {
        CartaError::Validation(format!("Invalid {}: '{}' ({})", field, value, e))
    })
}

/// Handle a price command
pub fn handle_prices_command(ctx: &CliContext, cmd: PricesCommands) -> CartaResult<()> {
    match cmd {
        PricesCommands::Show => {
            let store = ctx.open_store()?;
            print!("{}", format_prices(store.prices()));
        }

        PricesCommands::Set {
            movie,
            series,
            transfer_fee,
            per_chapter,
        } => {
            if movie.is_none() && series.is_none() && transfer_fee.is_none() && per_chapter.is_none()
            {
                println!("No changes specified. Use --movie, --series, --transfer-fee or --per-chapter.");
                return Ok(());
            }

            let mut store = ctx.open_admin_store()?;
            let mut prices = store.prices().clone();

            if let Some(movie) = movie {
                prices.movie_price = parse_money("movie price", &movie)?;
            }
            if let Some(series) = series {
                prices.series_price = parse_money("series price", &series)?;
            }
            if let Some(fee) = transfer_fee {
                prices.transfer_fee_percentage = fee;
            }
            if let Some(per_chapter) = per_chapter {
                prices.novel_price_per_chapter = parse_money("chapter price", &per_chapter)?;
            }

            match store.set_prices(prices) {
                CommandOutcome::Rejected(reason) => return Err(CartaError::Validation(reason)),
                _ => {
                    println!("Prices updated.");
                    print!("{}", format_prices(store.prices()));
                }
            }
        }
    }

    Ok(())
}
