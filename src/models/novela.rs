//! Novela model
//!
//! A novela is a telenovela in the storefront catalog, priced per chapter.
//! Field names on the wire are the storefront's Spanish keys (`titulo`,
//! `capitulos`, `año`, ...) so persisted snapshots stay compatible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::cart::PaymentType;
use super::ids::NovelaId;
use super::money::Money;
use super::prices::PriceConfig;

/// A catalog novela
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novela {
    pub id: NovelaId,

    #[serde(rename = "titulo")]
    pub title: String,

    /// Genre, usually two levels joined by `/` ("Drama/Romance")
    #[serde(rename = "genero")]
    pub genre: String,

    /// Number of chapters, always greater than zero
    #[serde(rename = "capitulos")]
    pub chapters: u32,

    #[serde(rename = "año")]
    pub year: i32,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price when paid in cash
    #[serde(rename = "costoEfectivo", default)]
    pub cash_price: Money,

    /// Price when paid by bank transfer
    #[serde(rename = "costoTransferencia", default)]
    pub transfer_price: Money,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Novela {
    /// Build a novela from admin input with an id and timestamp already issued
    pub fn from_new(id: NovelaId, new: NewNovela, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title.trim().to_string(),
            genre: new.genre.trim().to_string(),
            chapters: new.chapters,
            year: new.year,
            description: new.description.filter(|d| !d.trim().is_empty()),
            cash_price: new.cash_price,
            transfer_price: new.transfer_price,
            active: new.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Price for the given payment type
    pub fn price_for(&self, payment: PaymentType) -> Money {
        match payment {
            PaymentType::Cash => self.cash_price,
            PaymentType::Transfer => self.transfer_price,
        }
    }

    /// Set both prices from the per-chapter price list
    pub fn reprice(&mut self, prices: &PriceConfig) {
        self.cash_price = prices.novela_cash_price(self.chapters);
        self.transfer_price = prices.novela_transfer_price(self.chapters);
    }

    /// Apply a patch, refreshing `updated_at`
    pub fn apply(&mut self, update: &NovelaUpdate, now: DateTime<Utc>) {
        if let Some(title) = &update.title {
            self.title = title.trim().to_string();
        }
        if let Some(genre) = &update.genre {
            self.genre = genre.trim().to_string();
        }
        if let Some(chapters) = update.chapters {
            self.chapters = chapters;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(description) = &update.description {
            self.description = description.clone().filter(|d| !d.trim().is_empty());
        }
        if let Some(cash) = update.cash_price {
            self.cash_price = cash;
        }
        if let Some(transfer) = update.transfer_price {
            self.transfer_price = transfer;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = now;
    }
}

impl fmt::Display for Novela {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} chapters)", self.title, self.year, self.chapters)
    }
}

/// Admin input for a new novela
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNovela {
    pub title: String,
    pub genre: String,
    pub chapters: u32,
    pub year: i32,
    pub description: Option<String>,
    pub cash_price: Money,
    pub transfer_price: Money,
    pub active: bool,
}

impl NewNovela {
    /// New novela with explicit prices
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        chapters: u32,
        year: i32,
        cash_price: Money,
        transfer_price: Money,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            chapters,
            year,
            description: None,
            cash_price,
            transfer_price,
            active: true,
        }
    }

    /// New novela priced from the per-chapter price list
    pub fn priced(
        title: impl Into<String>,
        genre: impl Into<String>,
        chapters: u32,
        year: i32,
        prices: &PriceConfig,
    ) -> Self {
        Self::new(
            title,
            genre,
            chapters,
            year,
            prices.novela_cash_price(chapters),
            prices.novela_transfer_price(chapters),
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), NovelaValidationError> {
        validate_title(&self.title)?;
        validate_chapters(self.chapters)?;
        validate_price(self.cash_price)?;
        validate_price(self.transfer_price)
    }
}

/// Partial update of an existing novela
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovelaUpdate {
    pub id: NovelaId,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub chapters: Option<u32>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub cash_price: Option<Money>,
    pub transfer_price: Option<Money>,
    pub active: Option<bool>,
}

impl NovelaUpdate {
    pub fn new(id: NovelaId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn chapters(mut self, chapters: u32) -> Self {
        self.chapters = Some(chapters);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn cash_price(mut self, price: Money) -> Self {
        self.cash_price = Some(price);
        self
    }

    pub fn transfer_price(mut self, price: Money) -> Self {
        self.transfer_price = Some(price);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn validate(&self) -> Result<(), NovelaValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(chapters) = self.chapters {
            validate_chapters(chapters)?;
        }
        for price in [self.cash_price, self.transfer_price].into_iter().flatten() {
            validate_price(price)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), NovelaValidationError> {
    if title.trim().is_empty() {
        return Err(NovelaValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_chapters(chapters: u32) -> Result<(), NovelaValidationError> {
    if chapters == 0 {
        return Err(NovelaValidationError::NoChapters);
    }
    Ok(())
}

fn validate_price(price: Money) -> Result<(), NovelaValidationError> {
    if price.is_negative() {
        return Err(NovelaValidationError::NegativePrice(price));
    }
    Ok(())
}

/// Validation errors for novelas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NovelaValidationError {
    EmptyTitle,
    NoChapters,
    NegativePrice(Money),
}

impl fmt::Display for NovelaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Novela title cannot be empty"),
            Self::NoChapters => write!(f, "Novela must have at least one chapter"),
            Self::NegativePrice(price) => {
                write!(f, "Novela price cannot be negative ({})", price)
            }
        }
    }
}

impl std::error::Error for NovelaValidationError {}
