//! Money type for representing CUP amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. On the wire an amount is a plain number in major units (`80`,
//! `12.5`), which is the shape the storefront has always persisted.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

/// Represents a monetary amount stored as cents (hundredths of a peso)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use carta_admin::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole pesos
    ///
    /// # Examples
    /// ```
    /// use carta_admin::models::Money;
    /// let amount = Money::from_pesos(80);
    /// assert_eq!(amount.cents(), 8000);
    /// ```
    pub const fn from_pesos(pesos: i64) -> Self {
        Self(pesos * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole pesos portion (truncated toward zero)
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Amount in major units as a float, for serialization only
    pub fn as_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Build an amount from major units, rounding to the nearest cent
    pub fn from_major_units(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Apply a percentage surcharge, rounding half away from zero
    pub fn with_surcharge(&self, percentage: f64) -> Self {
        let extra = (self.0 as f64 * percentage / 100.0).round() as i64;
        Self(self.0 + extra)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        if self.cents_part() == 0 {
            write!(f, "{}${}", sign, self.pesos().abs())
        } else {
            write!(f, "{}${}.{:02}", sign, self.pesos().abs(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents_part() == 0 {
            serializer.serialize_i64(self.pesos())
        } else {
            serializer.serialize_f64(self.as_major_units())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major_units(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", value)))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, factor: u32) -> Self {
        Self(self.0 * i64::from(factor))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Accepts `80`, `12.5`, `$12.50`, `150 CUP` and a leading minus sign
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let rest = rest.strip_suffix("CUP").map(str::trim_end).unwrap_or(rest);

        // cents are the smallest unit
        if rest.is_empty()
            || !rest.chars().all(|c| c.is_ascii_digit() || c == '.')
            || rest.split_once('.').is_some_and(|(_, frac)| frac.len() > 2)
        {
            return Err(MoneyParseError(trimmed.to_string()));
        }

        let value: f64 = rest
            .parse()
            .map_err(|_| MoneyParseError(trimmed.to_string()))?;
        let amount =
            Money::from_major_units(value).ok_or_else(|| MoneyParseError(trimmed.to_string()))?;
        Ok(if negative { -amount } else { amount })
    }
}

/// Text that is not a CUP amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an amount: '{0}'")]
pub struct MoneyParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.pesos(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_pesos(80).to_string(), "$80");
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(10);
        let b = Money::from_pesos(5);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((b * 3).cents(), 1500);
    }

    #[test]
    fn test_surcharge() {
        assert_eq!(Money::from_pesos(300).with_surcharge(10.0), Money::from_pesos(330));
        assert_eq!(Money::from_pesos(50).with_surcharge(0.0), Money::from_pesos(50));
        // 5 * 1.15 = 5.75
        assert_eq!(Money::from_pesos(5).with_surcharge(15.0).cents(), 575);
    }

    #[test]
    fn test_parse_accepts_storefront_notation() {
        assert_eq!("80".parse::<Money>().unwrap(), Money::from_pesos(80));
        assert_eq!("$12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("150 CUP".parse::<Money>().unwrap(), Money::from_pesos(150));
        assert_eq!("-3".parse::<Money>().unwrap().cents(), -300);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["abc", "", "1.234", "1e3", "--5", "$"] {
            assert!(input.parse::<Money>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn test_serialization_uses_major_units() {
        assert_eq!(serde_json::to_string(&Money::from_pesos(80)).unwrap(), "80");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");

        let whole: Money = serde_json::from_str("300").unwrap();
        assert_eq!(whole, Money::from_pesos(300));

        let fractional: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(fractional.cents(), 1250);
    }
}
