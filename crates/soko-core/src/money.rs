//! # Money Module
//!
//! Provides the `Money` type for handling Ugandan Shilling amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Shillings                                        │
//! │    UGX is a zero-decimal currency (ISO 4217 exponent 0), so the        │
//! │    smallest unit IS the shilling. Every amount in the system is an     │
//! │    i64 count of whole shillings; floats appear only at the delivery    │
//! │    pricing boundary, where the product is rounded once and captured    │
//! │    as Money.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use soko_core::money::Money;
//!
//! // Create from whole shillings
//! let price = Money::from_ugx(5_000);
//!
//! // Arithmetic operations
//! let pair = price * 2;                       // UGX 10,000
//! let total = price + Money::from_ugx(700);   // UGX 5,700
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Ugandan Shillings.
///
/// ## Design Decisions
/// - **i64 (signed)**: Headroom for subtraction during reconciliation;
///   domain invariants keep user-visible amounts non-negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.price ──► Cart subtotal
///                                           │
/// distance_km ──► delivery_fee ─────────────┤
///                                           ▼
///                                   Quote.total ──► PaymentAttempt.amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole shillings.
    ///
    /// ## Example
    /// ```rust
    /// use soko_core::money::Money;
    ///
    /// let price = Money::from_ugx(5_000);
    /// assert_eq!(price.ugx(), 5_000);
    /// ```
    #[inline]
    pub const fn from_ugx(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole shillings.
    #[inline]
    pub const fn ugx(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Saturating addition.
    ///
    /// Used where one operand is derived from unbounded user input
    /// (the delivery fee) and must not panic on extreme values.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Formats the raw amount with comma digit grouping.
    ///
    /// Matches en-UG locale output for whole numbers without pulling
    /// in a locale library.
    ///
    /// ## Example
    /// ```rust
    /// use soko_core::money::Money;
    ///
    /// assert_eq!(Money::from_ugx(57_000).grouped(), "57,000");
    /// assert_eq!(Money::from_ugx(0).grouped(), "0");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            out.push('-');
        }
        let first_group = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - first_group) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and the terminal renderer. UGX has no
/// fractional digits, so there is no decimal point to worry about.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UGX {}", self.grouped())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for line quantities, if ever needed).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (cart subtotals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
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
    fn test_from_ugx() {
        let money = Money::from_ugx(5_000);
        assert_eq!(money.ugx(), 5_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_ugx(5_000)), "UGX 5,000");
        assert_eq!(format!("{}", Money::from_ugx(57_000)), "UGX 57,000");
        assert_eq!(format!("{}", Money::from_ugx(1_234_567)), "UGX 1,234,567");
        assert_eq!(format!("{}", Money::from_ugx(0)), "UGX 0");
        assert_eq!(format!("{}", Money::from_ugx(700)), "UGX 700");
        assert_eq!(format!("{}", Money::from_ugx(-550)), "UGX -550");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_ugx(1_000);
        let b = Money::from_ugx(500);

        assert_eq!((a + b).ugx(), 1_500);
        assert_eq!((a - b).ugx(), 500);
        let result: Money = a * 3;
        assert_eq!(result.ugx(), 3_000);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_ugx(5_000), Money::from_ugx(700), Money::zero()];
        let total: Money = prices.iter().copied().sum();
        assert_eq!(total.ugx(), 5_700);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_ugx(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }
}
