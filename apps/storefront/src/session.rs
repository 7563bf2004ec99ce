//! # Session State & Command Surface
//!
//! One in-memory session: the cart, the checkout flow, and the
//! commands the renderer invokes against them.
//!
//! ## Thread Safety
//! Cart and checkout flow live together behind one `Arc<Mutex<T>>`:
//! the success settlement (clear cart + reset flow) must be atomic, so
//! splitting them across locks would invite exactly the stale-total
//! bugs the state machine exists to prevent. Config and catalog are
//! read-only and shared freely.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Commands                                     │
//! │                                                                         │
//! │  Renderer Action          Command                 Session Change        │
//! │  ───────────────          ───────                 ──────────────        │
//! │                                                                         │
//! │  Click product ─────────► add_to_cart() ────────► cart.add + re-gate    │
//! │  Click remove ──────────► remove_from_cart() ───► bounds-checked remove │
//! │  Click checkout ────────► open_checkout() ──────► flow.open             │
//! │  Type distance ─────────► set_distance() ───────► flow distance + quote │
//! │  Click pay ─────────────► submit_payment() ─────► one async attempt,    │
//! │                                                   outcome always applied│
//! │  Click close ───────────► close_checkout() ─────► back to the gate      │
//! │                                                                         │
//! │  Every command returns a serializable view; the renderer owns all       │
//! │  presentation.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use soko_core::cart::{Cart, CartLine, CartTotals};
use soko_core::checkout::{CheckoutFlow, CheckoutPhase};
use soko_core::pricing::Quote;
use soko_core::types::{PaymentAttempt, PaymentProvider, PaymentStatus};
use soko_core::validation::validate_phone;

use crate::catalog::Catalog;
use crate::config::ConfigState;
use crate::error::ApiError;
use crate::gateway::PaymentGateway;

// =============================================================================
// Session
// =============================================================================

/// The per-session mutable state: one cart, one checkout flow.
#[derive(Debug)]
pub struct Session {
    pub cart: Cart,
    pub flow: CheckoutFlow,
}

impl Session {
    /// Creates a fresh session honoring the configured gate and rate.
    pub fn new(config: &ConfigState) -> Self {
        Session {
            cart: Cart::new(),
            flow: CheckoutFlow::configured(
                config.min_checkout_items,
                config.delivery_rate_per_km_ugx,
            ),
        }
    }
}

/// Shared, mutex-guarded session handle.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Creates session state for a new session.
    pub fn new(config: &ConfigState) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(Session::new(config))),
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// The lock is held only for the duration of `f`; it is never held
    /// across the payment await point.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

// =============================================================================
// View DTOs
// =============================================================================

/// Cart display payload: lines, totals, and the checkout control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// Whether the checkout control is enabled (gate satisfied).
    pub checkout_enabled: bool,
    /// Label for the checkout control ("Checkout Now" or how many
    /// more items are needed).
    pub checkout_label: String,
}

impl CartView {
    fn build(session: &Session) -> Self {
        let count = session.cart.count();
        CartView {
            lines: session.cart.lines.clone(),
            totals: CartTotals::from(&session.cart),
            checkout_enabled: session.flow.gate_open(count),
            checkout_label: session.flow.gate_label(count),
        }
    }
}

/// Checkout summary payload: phase, distance, and the derived quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub phase: CheckoutPhase,
    pub distance_km: f64,
    pub quote: Quote,
}

impl CheckoutView {
    fn build(session: &Session) -> Self {
        CheckoutView {
            phase: session.flow.phase(),
            distance_km: session.flow.distance_km(),
            quote: session.flow.quote(&session.cart),
        }
    }
}

/// Terminal payment notice: the settled attempt, ready to display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotice {
    pub status: PaymentStatus,
    pub provider: PaymentProvider,
    pub amount_ugx: i64,
    pub transaction_id: Option<String>,
    pub message: String,
}

impl From<&PaymentAttempt> for PaymentNotice {
    fn from(attempt: &PaymentAttempt) -> Self {
        PaymentNotice {
            status: attempt.status,
            provider: attempt.provider,
            amount_ugx: attempt.amount_ugx,
            transaction_id: attempt.transaction_id.clone(),
            message: attempt.message.clone(),
        }
    }
}

// =============================================================================
// Storefront Command Surface
// =============================================================================

/// The storefront: catalog + config + session + payment gateway.
///
/// Generic over the gateway so tests can force outcomes and the demo
/// can run the randomized simulator.
#[derive(Debug)]
pub struct Storefront<G> {
    catalog: Catalog,
    config: ConfigState,
    session: SessionState,
    gateway: G,
}

impl<G> Storefront<G> {
    /// Creates a storefront with a fresh session.
    pub fn new(catalog: Catalog, config: ConfigState, gateway: G) -> Self {
        let session = SessionState::new(&config);
        Storefront {
            catalog,
            config,
            session,
            gateway,
        }
    }

    /// The read-only catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The storefront configuration.
    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// Gets the current cart contents and checkout-control state.
    pub fn cart_view(&self) -> CartView {
        debug!("cart_view command");
        self.session.with_session(CartView::build)
    }

    /// Gets the current checkout summary.
    pub fn checkout_view(&self) -> CheckoutView {
        debug!("checkout_view command");
        self.session.with_session(CheckoutView::build)
    }

    /// Adds a catalog product to the cart.
    ///
    /// Always appends a new line (duplicates allowed); the gate is
    /// re-synced from the new count.
    pub fn add_to_cart(&self, product_id: &str) -> Result<CartView, ApiError> {
        debug!(product_id, "add_to_cart command");

        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| ApiError::not_found("Product", product_id))?;

        let view = self.session.with_session_mut(|s| {
            s.cart.add(product);
            s.flow.sync_gate(s.cart.count());
            CartView::build(s)
        });

        info!(product_id, count = view.totals.count, "Product added to cart");
        Ok(view)
    }

    /// Removes the cart line at `index`.
    ///
    /// An out-of-range index is a no-op, not a fault: the cart is
    /// returned unchanged.
    pub fn remove_from_cart(&self, index: usize) -> CartView {
        debug!(index, "remove_from_cart command");

        self.session.with_session_mut(|s| {
            if s.cart.remove_at(index) {
                s.flow.sync_gate(s.cart.count());
                info!(index, count = s.cart.count(), "Cart line removed");
            } else {
                debug!(index, count = s.cart.count(), "Removal index out of range, no-op");
            }
            CartView::build(s)
        })
    }

    /// Opens the checkout view (requires the gate to be satisfied).
    pub fn open_checkout(&self) -> Result<CheckoutView, ApiError> {
        debug!("open_checkout command");

        let view = self.session.with_session_mut(|s| {
            s.flow.open(s.cart.count())?;
            Ok::<_, ApiError>(CheckoutView::build(s))
        })?;

        info!(subtotal = view.quote.subtotal_ugx, "Checkout opened");
        Ok(view)
    }

    /// Closes the checkout view without paying.
    pub fn close_checkout(&self) -> Result<CartView, ApiError> {
        debug!("close_checkout command");

        self.session.with_session_mut(|s| {
            s.flow.close(s.cart.count())?;
            Ok(CartView::build(s))
        })
    }

    /// Updates the delivery distance from the raw input string and
    /// returns the refreshed summary. Bad input quietly defaults to 0.
    pub fn set_distance(&self, raw: &str) -> CheckoutView {
        debug!(raw, "set_distance command");

        self.session.with_session_mut(|s| {
            let km = s.flow.set_distance(raw);
            debug!(km, "Delivery distance updated");
            CheckoutView::build(s)
        })
    }
}

impl<G: PaymentGateway> Storefront<G> {
    /// Submits the payment for the open checkout.
    ///
    /// Drives the full attempt lifecycle: quote captured fresh at
    /// submit time, exactly one attempt in flight, outcome always
    /// applied. A declined payment is a *successful* command returning
    /// a Failed notice; the user may resubmit.
    pub async fn submit_payment(
        &self,
        provider: PaymentProvider,
        phone: &str,
    ) -> Result<PaymentNotice, ApiError> {
        debug!(%provider, "submit_payment command");

        let phone = validate_phone(phone).map_err(|e| ApiError::validation(e.to_string()))?;

        // Transition to Submitting and mint the attempt under the lock;
        // the re-entrancy guard lives in the state machine.
        let mut attempt = self.session.with_session_mut(|s| {
            let quote = s.flow.begin_submit(&s.cart)?;
            Ok::<_, ApiError>(PaymentAttempt::new(provider, phone, quote.total()))
        })?;

        info!(
            attempt_id = %attempt.id,
            amount = attempt.amount_ugx,
            "Payment attempt submitted"
        );

        // The one suspension point in the system. The lock is NOT held
        // here, so views stay readable while Submitting.
        let outcome = self
            .gateway
            .process(attempt.provider, &attempt.phone, attempt.amount())
            .await;

        // Apply the outcome atomically.
        self.session.with_session_mut(|s| match &outcome {
            Ok(receipt) => {
                attempt.settle(receipt);
                s.flow.settle_success(&mut s.cart);
                info!(
                    attempt_id = %attempt.id,
                    transaction_id = %receipt.transaction_id,
                    "Payment settled, cart cleared"
                );
            }
            Err(declined) => {
                attempt.decline(declined);
                s.flow.settle_failure();
                warn!(
                    attempt_id = %attempt.id,
                    message = %declined.message,
                    "Payment declined, checkout reopened"
                );
            }
        });

        Ok(PaymentNotice::from(&attempt))
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::gateway::{FixedOutcome, MomoSimulator, DECLINE_MESSAGE};

    /// 5,000 UGX per line keeps the expected totals round.
    const RICE: &str = "super-rice-1kg";

    fn storefront<G: PaymentGateway>(gateway: G) -> Storefront<G> {
        let mut config = ConfigState::default();
        config.payment_delay_ms = 0;
        Storefront::new(Catalog::seeded(), config, gateway)
    }

    fn fill<G: PaymentGateway>(front: &Storefront<G>, n: usize) {
        for _ in 0..n {
            front.add_to_cart(RICE).expect("catalog product");
        }
    }

    #[test]
    fn test_gate_flips_at_boundary() {
        let front = storefront(FixedOutcome::success("TXN000001"));

        fill(&front, 9);
        let view = front.cart_view();
        assert!(!view.checkout_enabled);
        assert_eq!(view.checkout_label, "Checkout (Add 1 more)");
        assert!(matches!(
            front.open_checkout(),
            Err(ApiError { code: ErrorCode::CheckoutLocked, .. })
        ));

        front.add_to_cart(RICE).unwrap();
        let view = front.cart_view();
        assert!(view.checkout_enabled);
        assert_eq!(view.checkout_label, "Checkout Now");
    }

    #[test]
    fn test_add_unknown_product_rejected() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        let err = front.add_to_cart("no-such-item").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(front.cart_view().totals.count, 0);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 2);

        let view = front.remove_from_cart(5);
        assert_eq!(view.totals.count, 2);
        assert_eq!(view.totals.subtotal_ugx, 10_000);

        let view = front.remove_from_cart(0);
        assert_eq!(view.totals.count, 1);
    }

    /// 10 items at 5,000 each, 10 km out.
    #[test]
    fn test_checkout_summary_totals() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 10);

        front.open_checkout().unwrap();
        let view = front.set_distance("10");

        assert_eq!(view.quote.subtotal_ugx, 50_000);
        assert_eq!(view.quote.delivery_fee_ugx, 7_000);
        assert_eq!(view.quote.total_ugx, 57_000);
        assert_eq!(
            view.quote.total_ugx,
            view.quote.subtotal_ugx + view.quote.delivery_fee_ugx
        );
    }

    #[test]
    fn test_invalid_distance_defaults_to_zero() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 10);
        front.open_checkout().unwrap();

        let view = front.set_distance("up the hill");
        assert_eq!(view.distance_km, 0.0);
        assert_eq!(view.quote.delivery_fee_ugx, 0);
    }

    /// A forced success settles, clears, and resets.
    #[tokio::test]
    async fn test_forced_success_clears_session() {
        let front = storefront(FixedOutcome::success("TXN424242"));
        fill(&front, 10);
        front.open_checkout().unwrap();
        front.set_distance("10");

        let notice = front
            .submit_payment(PaymentProvider::Mtn, "0772123456")
            .await
            .unwrap();

        assert_eq!(notice.status, PaymentStatus::Succeeded);
        assert_eq!(notice.amount_ugx, 57_000);
        let txn = notice.transaction_id.expect("transaction id present");
        assert!(!txn.is_empty());

        let cart = front.cart_view();
        assert_eq!(cart.totals.count, 0);
        assert_eq!(cart.totals.subtotal_ugx, 0);
        assert!(!cart.checkout_enabled);

        let checkout = front.checkout_view();
        assert_eq!(checkout.phase, CheckoutPhase::Locked);
        assert_eq!(checkout.distance_km, 0.0);
        assert_eq!(checkout.quote.delivery_fee_ugx, 0);
    }

    /// A forced failure keeps the cart and permits resubmit.
    #[tokio::test]
    async fn test_forced_failure_reopens_checkout() {
        let front = storefront(FixedOutcome::failure(DECLINE_MESSAGE));
        fill(&front, 10);
        front.open_checkout().unwrap();
        front.set_distance("4.5");

        let notice = front
            .submit_payment(PaymentProvider::Airtel, "0702123456")
            .await
            .unwrap();

        assert_eq!(notice.status, PaymentStatus::Failed);
        assert!(notice.transaction_id.is_none());
        assert_eq!(notice.message, DECLINE_MESSAGE);

        // Cart and inputs untouched, flow back to Open
        let cart = front.cart_view();
        assert_eq!(cart.totals.count, 10);
        let checkout = front.checkout_view();
        assert_eq!(checkout.phase, CheckoutPhase::Open);
        assert_eq!(checkout.distance_km, 4.5);

        // Resubmission is possible (and fails again with this gateway)
        let retry = front
            .submit_payment(PaymentProvider::Airtel, "0702123456")
            .await
            .unwrap();
        assert_eq!(retry.status, PaymentStatus::Failed);
    }

    /// Exactly one attempt while Submitting: the racing submit is
    /// rejected before any attempt is created.
    #[tokio::test]
    async fn test_submit_reentrancy_guard() {
        // Real latency so the second submit lands mid-flight
        let front = storefront(MomoSimulator::new(50, 10_000));
        fill(&front, 10);
        front.open_checkout().unwrap();

        let first = front.submit_payment(PaymentProvider::Mtn, "0772123456");
        let second = front.submit_payment(PaymentProvider::Mtn, "0772123456");
        let (first, second) = tokio::join!(first, second);

        let notice = first.expect("first attempt settles");
        assert_eq!(notice.status, PaymentStatus::Succeeded);

        let err = second.expect_err("second attempt rejected");
        assert_eq!(err.code, ErrorCode::PaymentInFlight);
    }

    #[tokio::test]
    async fn test_submit_requires_open_checkout() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 10);

        let err = front
            .submit_payment(PaymentProvider::Mtn, "0772123456")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_submit_requires_phone() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 10);
        front.open_checkout().unwrap();

        let err = front
            .submit_payment(PaymentProvider::Mtn, "   ")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // The failed validation must not consume the open checkout
        assert_eq!(front.checkout_view().phase, CheckoutPhase::Open);
    }

    #[test]
    fn test_close_checkout_returns_to_gate() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 10);
        front.open_checkout().unwrap();

        let view = front.close_checkout().unwrap();
        assert!(view.checkout_enabled);

        // Below the gate after removals, close re-locks
        front.open_checkout().unwrap();
        front.close_checkout().unwrap();
        front.remove_from_cart(0);
        assert!(!front.cart_view().checkout_enabled);
    }

    /// The quote charged is recomputed at submit time, not cached from
    /// when the checkout opened.
    #[tokio::test]
    async fn test_submitted_amount_is_fresh() {
        let front = storefront(FixedOutcome::success("TXN000001"));
        fill(&front, 10);
        front.open_checkout().unwrap();
        front.set_distance("10");

        // Distance changes after the summary was first shown
        front.set_distance("2.5");

        let notice = front
            .submit_payment(PaymentProvider::Mtn, "0772123456")
            .await
            .unwrap();
        assert_eq!(notice.amount_ugx, 50_000 + 1_750);
    }
}
