//! # Cart Module
//!
//! The authoritative list of cart lines and their derived aggregates.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  User Action              Operation              Cart Change            │
//! │  ───────────              ─────────              ───────────            │
//! │                                                                         │
//! │  Click "Add to Cart" ───► add(product) ────────► lines.push(line)       │
//! │                                                                         │
//! │  Click "Remove" ────────► remove_at(index) ────► lines.remove(index)    │
//! │                           (bounds-checked: out-of-range is a no-op)     │
//! │                                                                         │
//! │  Payment succeeds ──────► clear() ─────────────► lines.clear()          │
//! │                                                                         │
//! │  Every mutation ────────► count()/subtotal() recomputed on read;        │
//! │                           the checkout gate re-syncs from count()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Policy
//! Duplicates are allowed: adding the same product twice yields two
//! independent lines, not a quantity increment. A deliberate
//! simplicity-over-polish tradeoff for a demo storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One instance of a product placed in the cart.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog entry
/// - name/price/image are frozen at add-time: the cart displays
///   consistent data and never stores a mutated copy of the product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog id of the referenced product.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in whole shillings at time of adding (frozen).
    pub price_ugx: i64,

    /// Image reference at time of adding (frozen).
    pub image: String,

    /// When this line was added to the cart.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a cart line from a catalog product.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment; a later catalog change
    /// would not affect lines already in the cart.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price_ugx: product.price_ugx,
            image: product.image.clone(),
            added_at: Utc::now(),
        }
    }

    /// Returns the line price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_ugx(self.price_ugx)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered sequence of lines.
///
/// ## Invariants
/// - `count() >= 0` and `subtotal() >= 0` always
/// - `subtotal()` equals the sum of current line prices exactly:
///   recomputed on read, no cached aggregate to drift
/// - Lines keep insertion order; removal is positional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in the order they were added.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a line for `product` to the end of the cart.
    ///
    /// Always succeeds. Adding the same product twice yields two
    /// independent lines (no dedup, no quantity merge).
    pub fn add(&mut self, product: &Product) {
        self.lines.push(CartLine::from_product(product));
    }

    /// Removes the line at `index`.
    ///
    /// ## Returns
    /// - `true` if a line was removed
    /// - `false` if `index` is outside `[0, count())`; the cart is
    ///   left unchanged and no panic occurs
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        true
    }

    /// Clears all lines from the cart. Used after a successful payment.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of lines in the cart.
    #[inline]
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    /// Calculates the subtotal: the sum of all line prices.
    ///
    /// Returns zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::price).sum()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart aggregate summary for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub count: usize,
    pub subtotal_ugx: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            count: cart.count(),
            subtotal_ugx: cart.subtotal().ugx(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_ugx: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_ugx,
            image: format!("images/{}.jpg", id),
        }
    }

    #[test]
    fn test_add_appends_lines() {
        let mut cart = Cart::new();
        let product = test_product("rice-1kg", 4_500);

        cart.add(&product);
        cart.add(&product);

        // Duplicates are independent lines, not a quantity bump
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.subtotal().ugx(), 9_000);
        assert_eq!(cart.lines[0].product_id, "rice-1kg");
    }

    #[test]
    fn test_subtotal_tracks_lines_exactly() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 5_000));
        cart.add(&test_product("b", 700));
        cart.add(&test_product("c", 12_300));

        assert_eq!(cart.subtotal().ugx(), 18_000);

        assert!(cart.remove_at(1));
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.subtotal().ugx(), 17_300);

        cart.clear();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_remove_at_out_of_bounds_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 1_000));

        assert!(!cart.remove_at(1));
        assert!(!cart.remove_at(usize::MAX));
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.subtotal().ugx(), 1_000);

        // Empty cart: any index is out of bounds
        cart.clear();
        assert!(!cart.remove_at(0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_at_preserves_order() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100));
        cart.add(&test_product("b", 200));
        cart.add(&test_product("c", 300));

        assert!(cart.remove_at(0));
        assert_eq!(cart.lines[0].product_id, "b");
        assert_eq!(cart.lines[1].product_id, "c");
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut product = test_product("sugar-1kg", 5_500);
        cart.add(&product);

        // A later catalog price change must not affect the line
        product.price_ugx = 9_999;
        assert_eq!(cart.lines[0].price_ugx, 5_500);
        assert_eq!(cart.subtotal().ugx(), 5_500);
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 2_000));
        cart.add(&test_product("b", 3_000));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.subtotal_ugx, 5_000);
    }
}
