//! Price list display formatting

use crate::models::PriceConfig;

/// Format the price list with transfer prices alongside
pub fn format_prices(prices: &PriceConfig) -> String {
    let mut output = String::new();

    output.push_str("Prices\n");
    output.push_str("======\n");
    output.push_str(&format!("{:<20}  {:>10}  {:>10}\n", "", "Cash", "Transfer"));
    output.push_str(&format!(
        "{:<20}  {:>10}  {:>10}\n",
        "Movie",
        prices.movie_price.to_string(),
        prices.transfer_price(prices.movie_price).to_string(),
    ));
    output.push_str(&format!(
        "{:<20}  {:>10}  {:>10}\n",
        "Series (season)",
        prices.series_price.to_string(),
        prices.transfer_price(prices.series_price).to_string(),
    ));
    output.push_str(&format!(
        "{:<20}  {:>10}  {:>10}\n",
        "Novela (chapter)",
        prices.novel_price_per_chapter.to_string(),
        prices
            .transfer_price(prices.novel_price_per_chapter)
            .to_string(),
    ));
    output.push_str(&format!(
        "\nTransfer fee: {}%\n",
        prices.transfer_fee_percentage
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prices() {
        let output = format_prices(&PriceConfig::default());
        assert!(output.contains("$80"));
        assert!(output.contains("$88"));
        assert!(output.contains("$330"));
        assert!(output.contains("Transfer fee: 10%"));
    }
}
