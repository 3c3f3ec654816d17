//! # Money Module
//!
//! Provides the `Money` type for handling prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The web storefront stores prices as JS numbers:                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Catalog price "895"  →  Money(89_500)                                │
//! │    Every subtotal, shipping fee and total stays exact                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use santos_core::money::Money;
//!
//! let gown = Money::from_major(895);   // $895.00
//! let two = gown * 2u32;               // $1790.00
//! assert_eq!(two.cents(), 179_000);
//! assert_eq!(two.to_string(), "$1790.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Serialized as a bare integer so the front end receives `89500`, never a
/// float.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// The house catalog quotes prices in whole dollars, so this is the
    /// constructor the seed data and the price filter use.
    ///
    /// ```rust
    /// use santos_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(25).cents(), 2_500);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```text
    /// Lavender Wool Trench  $450.00
    /// Quantity              × 2
    ///                       ─────────
    /// Line total            $900.00
    /// ```
    #[inline]
    pub const fn times(&self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as i64))
    }

    /// Formats as `<symbol><units>.<cents>`, minus sign first.
    ///
    /// ```rust
    /// use santos_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).format_with("€"), "-€2.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Dollar formatting for logs and the seed listing. Localized display
/// belongs to the front end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: u32) -> Self {
        self.times(quantity)
    }
}

/// Lets cart code write `lines.iter().map(CartLine::line_total).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(895).cents(), 89_500);
        assert_eq!(Money::from_major(0), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_major(25).to_string(), "$25.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(450);
        let b = Money::from_major(25);

        assert_eq!((a + b).cents(), 47_500);
        assert_eq!((a - b).cents(), 42_500);
        assert_eq!((a * 3).cents(), 135_000);

        let mut running = Money::zero();
        running += a;
        assert_eq!(running, a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [320, 280, 550]
            .into_iter()
            .map(Money::from_major)
            .sum();
        assert_eq!(total, Money::from_major(1150));

        let empty: Money = std::iter::empty().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_major(395)).unwrap();
        assert_eq!(json, "39500");
    }
}
