//! # Delivery Pricing
//!
//! Distance parsing, delivery-fee computation, and the checkout quote.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Delivery Pricing                                   │
//! │                                                                         │
//! │  Distance input ("10", "2.5", "", "abc")                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_distance_km ──► invalid/empty/negative → 0.0                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  delivery_fee = round(distance_km × 700)    (whole shillings)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Quote { subtotal, delivery_fee, total = subtotal + delivery_fee }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The quote is derived, never stored: it is recomputed whenever the
//! cart or the distance changes, and again immediately before a
//! payment is submitted so the charged amount can never be stale.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::Money;
use crate::DELIVERY_RATE_PER_KM_UGX;

// =============================================================================
// Distance Parsing
// =============================================================================

/// Parses a distance input string into kilometres.
///
/// ## Rules
/// - Invalid, empty, or non-finite input → `0.0`
/// - Negative values → `0.0` (distance is non-negative by definition)
///
/// Bad input is recovered locally, never surfaced as an error: a
/// missing distance simply means free-of-delivery-fee pricing.
///
/// ## Example
/// ```rust
/// use soko_core::pricing::parse_distance_km;
///
/// assert_eq!(parse_distance_km("10"), 10.0);
/// assert_eq!(parse_distance_km(" 2.5 "), 2.5);
/// assert_eq!(parse_distance_km("abc"), 0.0);
/// assert_eq!(parse_distance_km(""), 0.0);
/// assert_eq!(parse_distance_km("-3"), 0.0);
/// ```
pub fn parse_distance_km(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(km) if km.is_finite() && km >= 0.0 => km,
        _ => 0.0,
    }
}

// =============================================================================
// Delivery Fee
// =============================================================================

/// Computes the delivery fee for a distance in kilometres.
///
/// `fee = round(distance_km × 700)`, rounded to the nearest whole
/// shilling since UGX carries no fractional unit.
///
/// ## Example
/// ```rust
/// use soko_core::pricing::delivery_fee;
///
/// assert_eq!(delivery_fee(10.0).ugx(), 7_000);
/// assert_eq!(delivery_fee(2.5).ugx(), 1_750);
/// assert_eq!(delivery_fee(0.0).ugx(), 0);
/// ```
pub fn delivery_fee(distance_km: f64) -> Money {
    delivery_fee_at_rate(distance_km, DELIVERY_RATE_PER_KM_UGX)
}

/// Delivery fee at an explicit per-km rate.
///
/// The storefront config may override the default rate; the rounding
/// policy is the same either way.
pub fn delivery_fee_at_rate(distance_km: f64, rate_per_km_ugx: i64) -> Money {
    let fee = (distance_km * rate_per_km_ugx as f64).round() as i64;
    Money::from_ugx(fee.max(0))
}

// =============================================================================
// Quote
// =============================================================================

/// The checkout summary: subtotal, delivery fee, and their total.
///
/// ## Invariant
/// `total == subtotal + delivery_fee` holds whenever a Quote exists;
/// the constructor is the only way to build one. The sum saturates at
/// `i64::MAX`, so an absurd distance entry cannot panic the pricing
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub subtotal_ugx: i64,
    pub delivery_fee_ugx: i64,
    pub total_ugx: i64,
}

impl Quote {
    /// Builds a quote from its two operands.
    pub fn new(subtotal: Money, delivery_fee: Money) -> Self {
        Quote {
            subtotal_ugx: subtotal.ugx(),
            delivery_fee_ugx: delivery_fee.ugx(),
            total_ugx: subtotal.saturating_add(delivery_fee).ugx(),
        }
    }

    /// Computes a fresh quote from the live cart and distance.
    pub fn compute(cart: &Cart, distance_km: f64) -> Self {
        Quote::new(cart.subtotal(), delivery_fee(distance_km))
    }

    /// Quote at a config-supplied per-km rate.
    pub fn compute_at_rate(cart: &Cart, distance_km: f64, rate_per_km_ugx: i64) -> Self {
        Quote::new(
            cart.subtotal(),
            delivery_fee_at_rate(distance_km, rate_per_km_ugx),
        )
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_ugx(self.total_ugx)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(price_ugx: i64) -> Product {
        Product {
            id: "p".to_string(),
            name: "P".to_string(),
            price_ugx,
            image: String::new(),
        }
    }

    #[test]
    fn test_parse_distance_defensive() {
        assert_eq!(parse_distance_km("10"), 10.0);
        assert_eq!(parse_distance_km("2.5"), 2.5);
        assert_eq!(parse_distance_km("  7.25  "), 7.25);
        assert_eq!(parse_distance_km(""), 0.0);
        assert_eq!(parse_distance_km("   "), 0.0);
        assert_eq!(parse_distance_km("abc"), 0.0);
        assert_eq!(parse_distance_km("-3"), 0.0);
        assert_eq!(parse_distance_km("NaN"), 0.0);
        assert_eq!(parse_distance_km("inf"), 0.0);
    }

    #[test]
    fn test_delivery_fee_representative_values() {
        assert_eq!(delivery_fee(0.0).ugx(), 0);
        assert_eq!(delivery_fee(1.0).ugx(), 700);
        assert_eq!(delivery_fee(10.0).ugx(), 7_000);
        // Fractional distance rounds to nearest whole shilling
        assert_eq!(delivery_fee(2.5).ugx(), 1_750);
        assert_eq!(delivery_fee(0.4).ugx(), 280);
        assert_eq!(delivery_fee(0.001).ugx(), 1);
    }

    #[test]
    fn test_delivery_fee_custom_rate() {
        assert_eq!(delivery_fee_at_rate(3.0, 1_000).ugx(), 3_000);
        assert_eq!(delivery_fee_at_rate(0.0, 1_000).ugx(), 0);
    }

    #[test]
    fn test_quote_invariant() {
        let quote = Quote::new(Money::from_ugx(50_000), Money::from_ugx(7_000));
        assert_eq!(quote.total_ugx, quote.subtotal_ugx + quote.delivery_fee_ugx);
        assert_eq!(quote.total().ugx(), 57_000);
    }

    #[test]
    fn test_quote_ten_items_ten_km() {
        let mut cart = Cart::new();
        for _ in 0..10 {
            cart.add(&product(5_000));
        }

        let quote = Quote::compute(&cart, 10.0);
        assert_eq!(quote.subtotal_ugx, 50_000);
        assert_eq!(quote.delivery_fee_ugx, 7_000);
        assert_eq!(quote.total_ugx, 57_000);
    }

    #[test]
    fn test_quote_saturates_on_extreme_distance() {
        let mut cart = Cart::new();
        cart.add(&product(5_000));

        // "1e300" is a valid f64; the fee cast saturates and the
        // total must follow suit instead of overflowing
        let km = parse_distance_km("1e300");
        let quote = Quote::compute(&cart, km);
        assert_eq!(quote.delivery_fee_ugx, i64::MAX);
        assert_eq!(quote.total_ugx, i64::MAX);
    }

    #[test]
    fn test_quote_empty_cart_zero_distance() {
        let cart = Cart::new();
        let quote = Quote::compute(&cart, 0.0);
        assert_eq!(quote.subtotal_ugx, 0);
        assert_eq!(quote.delivery_fee_ugx, 0);
        assert_eq!(quote.total_ugx, 0);
    }
}
