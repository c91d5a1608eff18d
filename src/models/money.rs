//! Money type for representing currency amounts
//!
//! Wraps a `rust_decimal::Decimal` so costs survive multiplication by
//! fractional stock quantities without floating-point drift. Amounts keep
//! full precision through arithmetic; rounding to 2 decimal places happens
//! only when a total is persisted or displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Represents a monetary amount as an exact decimal
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal amount
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round to 2 decimal places, half away from zero
    ///
    /// Applied at persistence boundaries; intermediate sums keep full
    /// precision.
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₦10.50", "$10.50", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        // Handle negative sign at start
        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Remove a currency symbol if present
        let s = s.strip_prefix('₦').or_else(|| s.strip_prefix('$')).unwrap_or(s);

        let amount =
            Decimal::from_str(s).map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -amount } else { amount }))
    }

    /// Format with a currency symbol, always showing 2 decimal places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded().0;
        if rounded.is_sign_negative() {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded().0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
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

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, quantity: Decimal) -> Self {
        Self(self.0 * quantity)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(dec("10.5"))), "10.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
        assert_eq!(format!("{}", Money::new(dec("-10.5"))), "-10.50");
        assert_eq!(format!("{}", Money::new(dec("0.05"))), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec("10"));
        let b = Money::new(dec("5"));

        assert_eq!((a + b).amount(), dec("15"));
        assert_eq!((a - b).amount(), dec("5"));
        assert_eq!((-a).amount(), dec("-10"));
    }

    #[test]
    fn test_mul_by_quantity() {
        let unit_cost = Money::new(dec("1200"));
        let total = unit_cost * dec("2.5");
        assert_eq!(total.amount(), dec("3000"));
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 + 0.2 is exactly 0.3 in decimal arithmetic
        let total = Money::new(dec("0.1")) + Money::new(dec("0.2"));
        assert_eq!(total.amount(), dec("0.3"));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Money::new(dec("10.005")).rounded().amount(), dec("10.01"));
        assert_eq!(Money::new(dec("10.004")).rounded().amount(), dec("10.00"));
        assert_eq!(Money::new(dec("-10.005")).rounded().amount(), dec("-10.01"));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().amount(), dec("10.5"));
        assert_eq!(Money::parse("₦10.50").unwrap().amount(), dec("10.5"));
        assert_eq!(Money::parse("$10.50").unwrap().amount(), dec("10.5"));
        assert_eq!(Money::parse("-10.50").unwrap().amount(), dec("-10.5"));
        assert_eq!(Money::parse("10").unwrap().amount(), dec("10"));
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::new(dec("1200")).format_with_symbol("₦"), "₦1200.00");
        assert_eq!(
            Money::new(dec("-42.519")).format_with_symbol("₦"),
            "-₦42.52"
        );
    }

    #[test]
    fn test_comparison() {
        assert!(Money::new(dec("10")) > Money::new(dec("5")));
        assert_eq!(Money::new(dec("10")), Money::new(dec("10.0")));
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::new(dec("1.10")),
            Money::new(dec("2.20")),
            Money::new(dec("3.30")),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.amount(), dec("6.60"));
    }

    #[test]
    fn test_serialization() {
        let m = Money::new(dec("10.50"));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
