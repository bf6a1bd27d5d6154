//! Delivery zone model
//!
//! A delivery zone is a named area ("Province > Municipality > Neighbourhood")
//! with the home-delivery cost charged at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ZoneId;
use super::money::Money;

/// Separator between the levels of a zone name
pub const ZONE_PATH_SEPARATOR: &str = " > ";

/// A delivery zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryZone {
    pub id: ZoneId,

    /// Hierarchical name, levels joined by `" > "`
    pub name: String,

    /// Delivery cost
    pub cost: Money,

    /// Whether the zone is offered at checkout
    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl DeliveryZone {
    /// Build a zone from admin input with an id and timestamp already issued
    pub fn from_new(id: ZoneId, new: NewZone, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.trim().to_string(),
            cost: new.cost,
            active: new.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// The levels of the zone name, outermost first
    pub fn path(&self) -> Vec<&str> {
        self.name
            .split('>')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// The innermost level of the zone name (the neighbourhood)
    pub fn short_name(&self) -> &str {
        self.path().last().copied().unwrap_or(self.name.as_str())
    }

    /// Apply a patch, refreshing `updated_at`
    pub fn apply(&mut self, update: &ZoneUpdate, now: DateTime<Utc>) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(cost) = update.cost {
            self.cost = cost;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = now;
    }
}

impl fmt::Display for DeliveryZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} CUP", self.name, self.cost)
    }
}

/// Admin input for a new zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewZone {
    pub name: String,
    pub cost: Money,
    pub active: bool,
}

impl NewZone {
    pub fn new(name: impl Into<String>, cost: Money) -> Self {
        Self {
            name: name.into(),
            cost,
            active: true,
        }
    }

    pub fn validate(&self) -> Result<(), ZoneValidationError> {
        validate_name(&self.name)?;
        validate_cost(self.cost)
    }
}

/// Partial update of an existing zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub id: ZoneId,
    pub name: Option<String>,
    pub cost: Option<Money>,
    pub active: Option<bool>,
}

impl ZoneUpdate {
    pub fn new(id: ZoneId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cost(mut self, cost: Money) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn validate(&self) -> Result<(), ZoneValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(cost) = self.cost {
            validate_cost(cost)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ZoneValidationError> {
    if name.trim().is_empty() {
        return Err(ZoneValidationError::EmptyName);
    }
    Ok(())
}

fn validate_cost(cost: Money) -> Result<(), ZoneValidationError> {
    if cost.is_negative() {
        return Err(ZoneValidationError::NegativeCost(cost));
    }
    Ok(())
}

/// Validation errors for delivery zones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneValidationError {
    EmptyName,
    NegativeCost(Money),
}

impl fmt::Display for ZoneValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Zone name cannot be empty"),
            Self::NegativeCost(cost) => write!(f, "Zone cost cannot be negative ({})", cost),
        }
    }
}

impl std::error::Error for ZoneValidationError {}
