//! # Checkout State Machine
//!
//! Gates checkout eligibility, carries the delivery distance, and
//! guards the single-attempt payment lifecycle.
//!
//! ## Phase Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Phases                                     │
//! │                                                                         │
//! │        cart mutation (count < 10)                                       │
//! │   ┌──────────────────────────────────┐                                  │
//! │   ▼                                  │                                  │
//! │ ┌────────┐  count >= 10   ┌──────────┴─┐  open()   ┌──────┐            │
//! │ │ Locked │───────────────►│  Unlocked  │──────────►│ Open │◄─────┐     │
//! │ └────────┘◄───────────────└────────────┘           └──┬───┘      │     │
//! │                count < 10        ▲       close()      │          │     │
//! │                                  └────────────────────┤          │     │
//! │                                            begin_submit()        │     │
//! │                                                       │          │     │
//! │                                                       ▼          │     │
//! │                                                ┌────────────┐    │     │
//! │                         settle_failure() ──────│ Submitting │────┘     │
//! │                         (cart untouched,       └─────┬──────┘          │
//! │                          back to Open)               │                 │
//! │                                                      │ settle_success()│
//! │                                                      ▼                 │
//! │                              cart cleared, distance reset, phase       │
//! │                              re-gated from the (now empty) cart        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Succeeded/Failed are transition outcomes, not resting phases: after
//! a settlement the phase is recomputed from the gate. Closing while
//! Submitting is rejected, so an in-flight outcome is always applied.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::pricing::{self, Quote};
use crate::{DELIVERY_RATE_PER_KM_UGX, MIN_ITEMS_FOR_CHECKOUT};

// =============================================================================
// Checkout Phase
// =============================================================================

/// Resting states of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Below the minimum item count; checkout action disabled.
    Locked,
    /// Gate satisfied; checkout action enabled.
    Unlocked,
    /// Checkout view open; summary displayed, awaiting submit.
    Open,
    /// A payment attempt is in flight; submit disabled.
    Submitting,
}

impl Default for CheckoutPhase {
    fn default() -> Self {
        CheckoutPhase::Locked
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Per-session checkout state.
///
/// ## Invariants
/// - At most one payment attempt in flight: `begin_submit` from
///   `Submitting` fails with `PaymentInFlight` and creates nothing
/// - The quote handed to the gateway is computed inside
///   `begin_submit` from the live cart and distance, never cached
/// - `Locked`/`Unlocked` are derived purely from the cart count via
///   `sync_gate`, which the session calls after every cart mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
    distance_km: f64,
    min_items: usize,
    rate_per_km_ugx: i64,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        CheckoutFlow::new()
    }
}

impl CheckoutFlow {
    /// Creates a flow with the stock gate (10 items) and delivery rate
    /// (700 UGX/km).
    pub fn new() -> Self {
        CheckoutFlow::configured(MIN_ITEMS_FOR_CHECKOUT, DELIVERY_RATE_PER_KM_UGX)
    }

    /// Creates a flow with config-supplied gate and rate.
    pub fn configured(min_items: usize, rate_per_km_ugx: i64) -> Self {
        CheckoutFlow {
            phase: CheckoutPhase::Locked,
            distance_km: 0.0,
            min_items,
            rate_per_km_ugx,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Current delivery distance in kilometres.
    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Whether the gate is satisfied for the given cart count.
    #[inline]
    pub fn gate_open(&self, count: usize) -> bool {
        count >= self.min_items
    }

    /// The label the checkout control should show for a cart count.
    ///
    /// Mirrors the storefront button text: below the gate the label
    /// states exactly how many more items are required.
    pub fn gate_label(&self, count: usize) -> String {
        if self.gate_open(count) {
            "Checkout Now".to_string()
        } else {
            format!("Checkout (Add {} more)", self.min_items - count)
        }
    }

    /// Re-derives Locked/Unlocked from the cart count.
    ///
    /// Called after every cart mutation. A checkout that is Open or
    /// Submitting is not disturbed: the view owns the cart while it is
    /// up, and the payment outcome re-gates on settlement.
    pub fn sync_gate(&mut self, count: usize) {
        match self.phase {
            CheckoutPhase::Locked | CheckoutPhase::Unlocked => {
                self.phase = if self.gate_open(count) {
                    CheckoutPhase::Unlocked
                } else {
                    CheckoutPhase::Locked
                };
            }
            CheckoutPhase::Open | CheckoutPhase::Submitting => {}
        }
    }

    /// Opens the checkout view.
    ///
    /// ## Errors
    /// - `CheckoutLocked` if the cart is below the minimum
    /// - `PaymentInFlight` if a payment is being processed
    /// - `InvalidTransition` if the view is already open
    pub fn open(&mut self, count: usize) -> CoreResult<()> {
        match self.phase {
            CheckoutPhase::Submitting => return Err(CoreError::PaymentInFlight),
            CheckoutPhase::Open => {
                return Err(CoreError::InvalidTransition {
                    phase: self.phase,
                    action: "open checkout",
                })
            }
            CheckoutPhase::Locked | CheckoutPhase::Unlocked => {}
        }

        if !self.gate_open(count) {
            return Err(CoreError::CheckoutLocked {
                count,
                needed: self.min_items - count,
            });
        }

        self.phase = CheckoutPhase::Open;
        Ok(())
    }

    /// Closes the checkout view without paying.
    ///
    /// The cart and the entered distance are kept; the phase returns
    /// to whatever the gate dictates. Closing while a payment is in
    /// flight is rejected: the outcome of an attempt is always
    /// applied, so the view stays up until it settles.
    pub fn close(&mut self, count: usize) -> CoreResult<()> {
        match self.phase {
            CheckoutPhase::Submitting => Err(CoreError::PaymentInFlight),
            CheckoutPhase::Open => {
                self.phase = CheckoutPhase::Locked;
                self.sync_gate(count);
                Ok(())
            }
            phase => Err(CoreError::InvalidTransition {
                phase,
                action: "close checkout",
            }),
        }
    }

    /// Updates the delivery distance from a raw input string.
    ///
    /// Invalid input defaults to 0 km (recovered locally, never an
    /// error). Returns the parsed value.
    pub fn set_distance(&mut self, raw: &str) -> f64 {
        self.distance_km = pricing::parse_distance_km(raw);
        self.distance_km
    }

    /// Computes the current checkout summary from the live cart.
    pub fn quote(&self, cart: &Cart) -> Quote {
        Quote::compute_at_rate(cart, self.distance_km, self.rate_per_km_ugx)
    }

    /// Moves to Submitting and returns the quote to charge.
    ///
    /// The quote is recomputed here, from the freshest cart subtotal
    /// and distance, so the charged total can never be stale.
    ///
    /// ## Errors
    /// - `PaymentInFlight` if an attempt is already being processed
    ///   (re-entrancy guard: no second attempt is created)
    /// - `InvalidTransition` if the checkout view is not open
    pub fn begin_submit(&mut self, cart: &Cart) -> CoreResult<Quote> {
        match self.phase {
            CheckoutPhase::Submitting => Err(CoreError::PaymentInFlight),
            CheckoutPhase::Open => {
                self.phase = CheckoutPhase::Submitting;
                Ok(self.quote(cart))
            }
            phase => Err(CoreError::InvalidTransition {
                phase,
                action: "submit payment",
            }),
        }
    }

    /// Applies a successful settlement.
    ///
    /// Performed atomically under the session lock: the cart is
    /// cleared, the distance (and with it the fee display) resets to
    /// zero, and the phase is re-gated from the now-empty cart.
    pub fn settle_success(&mut self, cart: &mut Cart) {
        debug_assert_eq!(self.phase, CheckoutPhase::Submitting);
        cart.clear();
        self.distance_km = 0.0;
        self.phase = CheckoutPhase::Locked;
        self.sync_gate(cart.count());
    }

    /// Applies a declined settlement.
    ///
    /// The cart and inputs are untouched; control returns to Open so
    /// the user may resubmit manually.
    pub fn settle_failure(&mut self) {
        debug_assert_eq!(self.phase, CheckoutPhase::Submitting);
        self.phase = CheckoutPhase::Open;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
