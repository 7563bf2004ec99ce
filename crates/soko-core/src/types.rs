//! # Domain Types
//!
//! Core domain types used throughout the Soko storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ PaymentAttempt  │   │ PaymentReceipt  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (slug)      │   │  id (UUID)      │   │  transaction_id │       │
//! │  │  name           │   │  provider       │   │  message        │       │
//! │  │  price          │   │  amount         │   └─────────────────┘       │
//! │  │  image          │   │  status         │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │ PaymentDeclined │       │
//! │                                              │  ─────────────  │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  message        │       │
//! │  │ PaymentProvider │   │  PaymentStatus  │   └─────────────────┘       │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Mtn            │   │  Pending        │                             │
//! │  │  Airtel         │   │  Succeeded      │                             │
//! │  └─────────────────┘   │  Failed         │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the external catalog.
///
/// The catalog is static and read-only to this crate: cart lines
/// reference products as they existed at add-time and never store a
/// mutated copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (catalog slug, e.g. "matooke-bunch").
    pub id: String,

    /// Display name shown on cards and cart lines.
    pub name: String,

    /// Price in whole shillings.
    pub price_ugx: i64,

    /// Image reference (path or URL; opaque to the core).
    pub image: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_ugx(self.price_ugx)
    }
}

// =============================================================================
// Payment Provider
// =============================================================================

/// Mobile-money providers accepted at checkout.
///
/// Closed set: the checkout form offers exactly these two networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    /// MTN Mobile Money.
    Mtn,
    /// Airtel Money.
    Airtel,
}

impl PaymentProvider {
    /// Human-readable network name, as shown in payment messages.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentProvider::Mtn => "MTN",
            PaymentProvider::Airtel => "Airtel",
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for unrecognized provider names.
#[derive(Debug, Error)]
#[error("Unknown payment provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for PaymentProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mtn" => Ok(PaymentProvider::Mtn),
            "airtel" => Ok(PaymentProvider::Airtel),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Lifecycle status of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Attempt submitted, gateway has not yet settled it.
    Pending,
    /// Gateway resolved the attempt successfully.
    Succeeded,
    /// Gateway declined the attempt.
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// Payment Attempt
// =============================================================================

/// One asynchronous payment request to the gateway.
///
/// Transient: created when checkout is submitted, discarded once its
/// terminal outcome has been surfaced. At most one attempt may be in
/// flight at a time (enforced by the checkout state machine).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAttempt {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Network the payment is charged against.
    pub provider: PaymentProvider,

    /// Subscriber phone number, passed through to the gateway as-is.
    pub phone: String,

    /// Amount charged, in whole shillings. Captured from the freshest
    /// quote at submit time.
    pub amount_ugx: i64,

    /// Current lifecycle status.
    pub status: PaymentStatus,

    /// Gateway transaction id, present once settled successfully.
    pub transaction_id: Option<String>,

    /// Gateway message (success confirmation or decline reason).
    pub message: String,

    /// When the attempt was submitted.
    pub created_at: DateTime<Utc>,
}

impl PaymentAttempt {
    /// Creates a new pending attempt.
    pub fn new(provider: PaymentProvider, phone: impl Into<String>, amount: Money) -> Self {
        PaymentAttempt {
            id: Uuid::new_v4().to_string(),
            provider,
            phone: phone.into(),
            amount_ugx: amount.ugx(),
            status: PaymentStatus::Pending,
            transaction_id: None,
            message: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns the charged amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_ugx(self.amount_ugx)
    }

    /// Marks the attempt settled with a gateway receipt.
    pub fn settle(&mut self, receipt: &PaymentReceipt) {
        self.status = PaymentStatus::Succeeded;
        self.transaction_id = Some(receipt.transaction_id.clone());
        self.message = receipt.message.clone();
    }

    /// Marks the attempt declined.
    pub fn decline(&mut self, declined: &PaymentDeclined) {
        self.status = PaymentStatus::Failed;
        self.transaction_id = None;
        self.message = declined.message.clone();
    }
}

// =============================================================================
// Gateway Outcomes
// =============================================================================

/// Successful settlement payload from the payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Gateway-assigned transaction id (e.g. "TXN483920").
    pub transaction_id: String,

    /// Confirmation message, surfaced verbatim to the user.
    pub message: String,
}

/// Decline payload from the payment gateway.
///
/// A decline is a recoverable condition, not a fault: the checkout
/// returns to Open and the user may resubmit manually. The system
/// never retries on its own.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct PaymentDeclined {
    /// Decline reason, surfaced verbatim to the user.
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
