//! Catalog view
//!
//! Filtered and sorted novela listings plus catalog statistics, computed
//! from a borrowed slice. Nothing here mutates the catalog.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Money, Novela, PaymentType};

/// Genre filter value that matches every novela
pub const ALL_GENRES: &str = "all";

/// Sort order of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Title ascending, ignoring case and accents
    #[default]
    Title,
    /// Newest first
    Year,
    /// Longest first
    Chapters,
    /// Cheapest first, by the query's payment type
    Price,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" | "titulo" => Ok(Self::Title),
            "year" | "año" => Ok(Self::Year),
            "chapters" | "capitulos" => Ok(Self::Chapters),
            "price" | "precio" => Ok(Self::Price),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Year => write!(f, "year"),
            Self::Chapters => write!(f, "chapters"),
            Self::Price => write!(f, "price"),
        }
    }
}

/// A catalog query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring of title or genre; empty matches all
    pub search: String,
    /// Exact genre, case-insensitive, or `"all"`
    pub genre: String,
    pub sort: SortKey,
    pub payment: PaymentType,
    /// Hide novelas the admin has deactivated
    pub active_only: bool,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: ALL_GENRES.to_string(),
            sort: SortKey::default(),
            payment: PaymentType::default(),
            active_only: false,
        }
    }
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn payment(mut self, payment: PaymentType) -> Self {
        self.payment = payment;
        self
    }

    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    /// Whether a novela passes the filters
    pub fn matches(&self, novela: &Novela) -> bool {
        if self.active_only && !novela.active {
            return false;
        }

        let genre = self.genre.trim();
        if !genre.is_empty()
            && !genre.eq_ignore_ascii_case(ALL_GENRES)
            && novela.genre.to_lowercase() != genre.to_lowercase()
        {
            return false;
        }

        let term = self.search.to_lowercase();
        term.is_empty()
            || novela.title.to_lowercase().contains(&term)
            || novela.genre.to_lowercase().contains(&term)
    }
}

/// Catalog statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    /// Distinct genres in order of first appearance
    pub genres: Vec<String>,
    pub total: usize,
    pub filtered: usize,
    /// Mean chapter count rounded to the nearest integer, 0 for an empty catalog
    pub average_chapters: u32,
}

/// Filter then sort
pub fn filter_and_sort<'a>(novelas: &'a [Novela], query: &CatalogQuery) -> Vec<&'a Novela> {
    let mut selected: Vec<&Novela> = novelas.iter().filter(|n| query.matches(n)).collect();

    // sort_by is stable: equal keys keep catalog order
    match query.sort {
        SortKey::Title => selected.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::Year => selected.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Chapters => selected.sort_by(|a, b| b.chapters.cmp(&a.chapters)),
        SortKey::Price => selected
            .sort_by(|a, b| a.price_for(query.payment).cmp(&b.price_for(query.payment))),
    }

    selected
}

/// Distinct genres in order of first appearance
pub fn genres(novelas: &[Novela]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for novela in novelas {
        if !seen.iter().any(|g| g == &novela.genre) {
            seen.push(novela.genre.clone());
        }
    }
    seen
}

/// Mean chapter count, rounded half away from zero; 0 when empty
pub fn average_chapters(novelas: &[Novela]) -> u32 {
    if novelas.is_empty() {
        return 0;
    }
    let total: u64 = novelas.iter().map(|n| u64::from(n.chapters)).sum();
    let count = novelas.len() as u64;
    ((total * 2 + count) / (count * 2)) as u32
}

/// Statistics over the whole catalog and the query's selection
pub fn stats(novelas: &[Novela], query: &CatalogQuery) -> CatalogStats {
    CatalogStats {
        genres: genres(novelas),
        total: novelas.len(),
        filtered: novelas.iter().filter(|n| query.matches(n)).count(),
        average_chapters: average_chapters(novelas),
    }
}

/// Sum of a selection's prices under one payment type
pub fn total_price<'a>(novelas: impl IntoIterator<Item = &'a Novela>, payment: PaymentType) -> Money {
    novelas.into_iter().map(|n| n.price_for(payment)).sum()
}

/// Compare titles the way a Spanish-speaking reader expects
///
/// Case and accents are ignored (`Ángel` sorts with `angel`); exact text
/// only breaks ties.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Lowercase and strip the diacritics used in Spanish and Portuguese titles
fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
