//! Novela display formatting
//!
//! Catalog listings, single-novela details and catalog statistics.

use crate::models::{Money, Novela, PaymentType};
use crate::services::CatalogStats;

const TITLE_MAX: usize = 36;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 3).collect();
        format!("{}...", cut)
    }
}

/// Format a catalog listing, priced by one payment type
pub fn format_novela_list(novelas: &[&Novela], payment: PaymentType) -> String {
    if novelas.is_empty() {
        return "No novelas found.".to_string();
    }

    let title_width = novelas
        .iter()
        .map(|n| n.title.chars().count().min(TITLE_MAX))
        .max()
        .unwrap_or(5)
        .max(5);

    let genre_width = novelas
        .iter()
        .map(|n| n.genre.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>13}  {:<title_width$}  {:<genre_width$}  {:>4}  {:>5}  {:>10}\n",
        "ID",
        "Title",
        "Genre",
        "Year",
        "Caps",
        "Price",
        title_width = title_width,
        genre_width = genre_width,
    ));
    output.push_str(&format!(
        "{:->13}  {:-<title_width$}  {:-<genre_width$}  {:->4}  {:->5}  {:->10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        title_width = title_width,
        genre_width = genre_width,
    ));

    for novela in novelas {
        let marker = if novela.active { "" } else { "  (inactive)" };
        output.push_str(&format!(
            "{:>13}  {:<title_width$}  {:<genre_width$}  {:>4}  {:>5}  {:>10}{}\n",
            novela.id.value(),
            truncate(&novela.title, TITLE_MAX),
            novela.genre,
            novela.year,
            novela.chapters,
            novela.price_for(payment).to_string(),
            marker,
            title_width = title_width,
            genre_width = genre_width,
        ));
    }

    let total: Money = novelas.iter().map(|n| n.price_for(payment)).sum();
    output.push_str(&format!(
        "\n{} novela(s), {} paying by {}\n",
        novelas.len(),
        total,
        payment
    ));

    output
}

/// Format a single novela's details
pub fn format_novela_details(novela: &Novela) -> String {
    let mut output = String::new();

    output.push_str(&format!("Novela: {}\n", novela.title));
    output.push_str(&format!("  ID:             {}\n", novela.id));
    output.push_str(&format!("  Genre:          {}\n", novela.genre));
    output.push_str(&format!("  Year:           {}\n", novela.year));
    output.push_str(&format!("  Chapters:       {}\n", novela.chapters));
    output.push_str(&format!("  Cash price:     {}\n", novela.cash_price));
    output.push_str(&format!("  Transfer price: {}\n", novela.transfer_price));
    output.push_str(&format!(
        "  Active:         {}\n",
        if novela.active { "Yes" } else { "No" }
    ));
    if let Some(description) = &novela.description {
        output.push_str(&format!("\n  {}\n", description));
    }

    output
}

/// Format catalog statistics
pub fn format_catalog_stats(stats: &CatalogStats) -> String {
    let mut output = String::new();

    output.push_str("Catalog Statistics\n");
    output.push_str("==================\n");
    output.push_str(&format!("Novelas:           {}\n", stats.total));
    output.push_str(&format!("Matching filters:  {}\n", stats.filtered));
    output.push_str(&format!("Average chapters:  {}\n", stats.average_chapters));
    output.push_str(&format!("Genres ({}):\n", stats.genres.len()));
    for genre in &stats.genres {
        output.push_str(&format!("  - {}\n", genre));
    }

    output
}
