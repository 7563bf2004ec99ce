//! # Payment Gateway
//!
//! The checkout flow's one external collaborator: an asynchronous
//! payment processor behind a trait seam.
//!
//! ## Simulated Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MomoSimulator behavior                               │
//! │                                                                         │
//! │  process(provider, phone, amount)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sleep(delay)                     fixed latency (default 2000 ms)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  draw 0..10000                                                          │
//! │       │                                                                 │
//! │       ├── < success_bps (90%) ──► Ok(PaymentReceipt {                   │
//! │       │                              transactionId: "TXN483920",        │
//! │       │                              message: "Payment successful       │
//! │       │                                        via MTN" })              │
//! │       │                                                                 │
//! │       └── otherwise ────────────► Err(PaymentDeclined {                 │
//! │                                      message: "Payment failed.          │
//! │                                      Insufficient funds or network      │
//! │                                      error." })                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller treats the gateway as opaque and never retries on its
//! own; a decline is surfaced to the user, who may resubmit manually.

use std::time::Duration;

use rand::Rng;
use tracing::info;

use soko_core::types::{PaymentDeclined, PaymentProvider, PaymentReceipt};
use soko_core::Money;

use crate::config::ConfigState;

/// Decline message the simulator surfaces to the user.
pub const DECLINE_MESSAGE: &str = "Payment failed. Insufficient funds or network error.";

// =============================================================================
// Gateway Trait
// =============================================================================

/// An asynchronous payment processor.
///
/// One call, one attempt: the checkout flow guarantees at most one
/// outstanding `process` call per session, and always applies the
/// outcome once it arrives.
pub trait PaymentGateway {
    /// Charges `amount` to `phone` on the given network.
    fn process(
        &self,
        provider: PaymentProvider,
        phone: &str,
        amount: Money,
    ) -> impl std::future::Future<Output = Result<PaymentReceipt, PaymentDeclined>> + Send;
}

// =============================================================================
// Mobile-Money Simulator
// =============================================================================

/// Simulated MTN/Airtel mobile-money processor.
///
/// Resolves after a fixed delay with a randomized outcome. Both knobs
/// come from config so demos and tests can tighten them.
#[derive(Debug, Clone)]
pub struct MomoSimulator {
    delay: Duration,
    success_bps: u32,
}

impl MomoSimulator {
    /// Creates a simulator with explicit latency and success rate.
    pub fn new(delay_ms: u64, success_bps: u32) -> Self {
        MomoSimulator {
            delay: Duration::from_millis(delay_ms),
            success_bps: success_bps.min(10_000),
        }
    }

    /// Creates a simulator from storefront config.
    pub fn from_config(config: &ConfigState) -> Self {
        MomoSimulator::new(config.payment_delay_ms, config.payment_success_bps)
    }
}

impl PaymentGateway for MomoSimulator {
    fn process(
        &self,
        provider: PaymentProvider,
        phone: &str,
        amount: Money,
    ) -> impl std::future::Future<Output = Result<PaymentReceipt, PaymentDeclined>> + Send {
        let delay = self.delay;
        let success_bps = self.success_bps;
        let phone = phone.to_string();

        async move {
            info!(%provider, phone, amount = %amount, "Processing mobile-money payment");

            tokio::time::sleep(delay).await;

            // Single draw decides the outcome; the txn id gets its own draw
            let (roll, txn_suffix) = {
                let mut rng = rand::rng();
                (
                    rng.random_range(0..10_000u32),
                    rng.random_range(0..1_000_000u32),
                )
            };

            if roll < success_bps {
                Ok(PaymentReceipt {
                    transaction_id: format!("TXN{:06}", txn_suffix),
                    message: format!("Payment successful via {}", provider),
                })
            } else {
                Err(PaymentDeclined {
                    message: DECLINE_MESSAGE.to_string(),
                })
            }
        }
    }
}

// =============================================================================
// Fixed-Outcome Gateway
// =============================================================================

/// Gateway that settles instantly with a predetermined outcome.
///
/// Used by scenario tests (forced success / forced failure) and
/// useful for scripted demos.
#[derive(Debug, Clone)]
pub struct FixedOutcome {
    outcome: Result<PaymentReceipt, PaymentDeclined>,
}

impl FixedOutcome {
    /// Always settles successfully with the given transaction id.
    pub fn success(transaction_id: &str) -> Self {
        FixedOutcome {
            outcome: Ok(PaymentReceipt {
                transaction_id: transaction_id.to_string(),
                message: "Payment successful".to_string(),
            }),
        }
    }

    /// Always declines with the given message.
    pub fn failure(message: &str) -> Self {
        FixedOutcome {
            outcome: Err(PaymentDeclined {
                message: message.to_string(),
            }),
        }
    }
}

impl PaymentGateway for FixedOutcome {
    fn process(
        &self,
        _provider: PaymentProvider,
        _phone: &str,
        _amount: Money,
    ) -> impl std::future::Future<Output = Result<PaymentReceipt, PaymentDeclined>> + Send {
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulator_always_succeeds_at_full_bps() {
        let gateway = MomoSimulator::new(0, 10_000);
        let receipt = gateway
            .process(
                PaymentProvider::Mtn,
                "0772123456",
                Money::from_ugx(57_000),
            )
            .await
            .expect("forced success");

        assert!(receipt.transaction_id.starts_with("TXN"));
        assert_eq!(receipt.transaction_id.len(), 9);
        assert_eq!(receipt.message, "Payment successful via MTN");
    }

    #[tokio::test]
    async fn test_simulator_always_declines_at_zero_bps() {
        let gateway = MomoSimulator::new(0, 0);
        let declined = gateway
            .process(
                PaymentProvider::Airtel,
                "0702123456",
                Money::from_ugx(1_000),
            )
            .await
            .expect_err("forced decline");

        assert_eq!(declined.message, DECLINE_MESSAGE);
    }

    #[tokio::test]
    async fn test_fixed_outcome_gateways() {
        let ok = FixedOutcome::success("TXN000042");
        let receipt = ok
            .process(PaymentProvider::Mtn, "0772", Money::from_ugx(10))
            .await
            .unwrap();
        assert_eq!(receipt.transaction_id, "TXN000042");

        let bad = FixedOutcome::failure("out of float");
        let declined = bad
            .process(PaymentProvider::Mtn, "0772", Money::from_ugx(10))
            .await
            .unwrap_err();
        assert_eq!(declined.message, "out of float");
    }

    #[test]
    fn test_bps_clamped() {
        let gateway = MomoSimulator::new(0, 20_000);
        assert_eq!(gateway.success_bps, 10_000);
    }
}
