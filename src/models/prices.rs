//! Price configuration model
//!
//! The storefront's price list: per-title prices for movies and series, the
//! per-chapter novela price and the bank-transfer surcharge.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Storefront prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceConfig {
    /// Price of one movie
    pub movie_price: Money,

    /// Price of one series season
    pub series_price: Money,

    /// Surcharge applied when paying by bank transfer, in percent
    pub transfer_fee_percentage: f64,

    /// Price of a single novela chapter
    pub novel_price_per_chapter: Money,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            movie_price: Money::from_pesos(80),
            series_price: Money::from_pesos(300),
            transfer_fee_percentage: 10.0,
            novel_price_per_chapter: Money::from_pesos(5),
        }
    }
}

impl PriceConfig {
    /// Price of `base` when paid by bank transfer
    pub fn transfer_price(&self, base: Money) -> Money {
        base.with_surcharge(self.transfer_fee_percentage)
    }

    /// Cash price of a novela with the given number of chapters
    pub fn novela_cash_price(&self, chapters: u32) -> Money {
        self.novel_price_per_chapter * chapters
    }

    /// Transfer price of a novela with the given number of chapters
    pub fn novela_transfer_price(&self, chapters: u32) -> Money {
        self.transfer_price(self.novela_cash_price(chapters))
    }

    /// One-line summary used in notifications and reports
    pub fn summary(&self) -> String {
        format!(
            "Movie: {}, Series: {}, Transfer: {}%, Novela: {}/chapter",
            self.movie_price,
            self.series_price,
            self.transfer_fee_percentage,
            self.novel_price_per_chapter
        )
    }

    /// Validate the price list
    pub fn validate(&self) -> Result<(), PriceValidationError> {
        let amounts = [
            ("moviePrice", self.movie_price),
            ("seriesPrice", self.series_price),
            ("novelPricePerChapter", self.novel_price_per_chapter),
        ];

        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(PriceValidationError::NegativeAmount(field));
            }
        }

        let fee = self.transfer_fee_percentage;
        if !fee.is_finite() || !(0.0..=100.0).contains(&fee) {
            return Err(PriceValidationError::FeeOutOfRange(fee));
        }

        Ok(())
    }
}

/// Validation errors for price configuration
#[derive(Debug, Clone, PartialEq)]
pub enum PriceValidationError {
    NegativeAmount(&'static str),
    FeeOutOfRange(f64),
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(field) => write!(f, "{} cannot be negative", field),
            Self::FeeOutOfRange(fee) => {
                write!(f, "Transfer fee must be between 0 and 100 (got {})", fee)
            }
        }
    }
}

impl std::error::Error for PriceValidationError {}
