//! # soko-core: Pure Business Logic for the Soko Storefront
//!
//! This crate is the **heart** of Soko. It contains all cart and
//! checkout logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Soko Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Rendering sink (terminal demo)                   │   │
//! │  │    Catalog view ──► Cart view ──► Checkout view ──► Notice      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apps/storefront (session layer)                │   │
//! │  │    add_to_cart, remove_from_cart, open_checkout,                │   │
//! │  │    set_distance, submit_payment                                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ soko-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │  pricing  │  │ checkout  │  │   money   │  │   │
//! │  │   │   Cart    │  │   Quote   │  │   Flow    │  │   Money   │  │   │
//! │  │   │ CartLine  │  │ delivery  │  │  phases   │  │  (UGX)    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK CONTROL FLOW • NO RENDERING • PURE LOGIC   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PaymentAttempt, providers)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart: ordered lines, derived aggregates
//! - [`pricing`] - Distance parsing and delivery-fee math
//! - [`checkout`] - The checkout state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, clock-driven control flow, rendering are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole shillings (i64); UGX has
//!    no fractional unit, so floats touch the math only at the delivery-fee
//!    rounding boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use soko_core::cart::Cart;
//! use soko_core::checkout::CheckoutFlow;
//! use soko_core::types::Product;
//!
//! let product = Product {
//!     id: "rice-1kg".into(),
//!     name: "Super Rice 1kg".into(),
//!     price_ugx: 5_000,
//!     image: "images/rice.jpg".into(),
//! };
//!
//! let mut cart = Cart::new();
//! let mut flow = CheckoutFlow::new();
//! for _ in 0..10 {
//!     cart.add(&product);
//!     flow.sync_gate(cart.count());
//! }
//!
//! flow.open(cart.count()).unwrap();
//! flow.set_distance("10");
//! let quote = flow.begin_submit(&cart).unwrap();
//! assert_eq!(quote.total_ugx, 57_000); // 50,000 + 7,000 delivery
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use soko_core::Money` instead of
// `use soko_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use checkout::{CheckoutFlow, CheckoutPhase};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::Quote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum number of cart lines before checkout unlocks.
///
/// ## Business Reason
/// Delivery only pays for itself on bulk orders; below this threshold
/// the checkout control stays disabled and tells the user how many
/// more items are needed.
pub const MIN_ITEMS_FOR_CHECKOUT: usize = 10;

/// Delivery rate in whole shillings per kilometre.
pub const DELIVERY_RATE_PER_KM_UGX: i64 = 700;

/// Default simulated gateway latency in milliseconds.
///
/// The storefront config may override this (and tests shrink it to
/// zero).
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 2_000;

/// Default gateway success probability in basis points (9000 = 90%).
pub const DEFAULT_PAYMENT_SUCCESS_BPS: u32 = 9_000;
