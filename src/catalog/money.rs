//! Money Module
//!
//! Catalog prices arrive as decimals; they are held as integer cents so cart
//! totals add up exactly.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::Serialize;

// == Money ==
/// A non-negative dollar amount stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Money {
    /// Amount in cents
    pub amount_cents: u64,
}

impl Money {
    /// Creates a Money value from cents.
    pub const fn from_cents(amount_cents: u64) -> Self {
        Self { amount_cents }
    }

    /// Zero dollars.
    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Converts a catalog decimal price, rounding to the nearest cent.
    ///
    /// Returns `None` for negative, NaN or infinite input.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Some(Self::from_cents((amount * 100.0).round() as u64))
    }

    /// Returns the amount as a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Formats without the currency symbol (e.g. "799.99").
    pub fn display_amount(&self) -> String {
        format!("{}.{:02}", self.amount_cents / 100, self.amount_cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money::from_cents(self.amount_cents.saturating_mul(u64::from(quantity)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.display_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(799.99).unwrap().amount_cents, 79999);
        assert_eq!(Money::from_decimal(9.995).unwrap().amount_cents, 1000);
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::zero());
    }

    #[test]
    fn test_from_decimal_rejects_invalid() {
        assert!(Money::from_decimal(-0.01).is_none());
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(79999).to_string(), "$799.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(1000).display_amount(), "10.00");
    }

    #[test]
    fn test_multiply_and_sum() {
        let price = Money::from_cents(79999);
        assert_eq!(price * 2, Money::from_cents(159998));

        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.amount_cents, 350);
    }
}
