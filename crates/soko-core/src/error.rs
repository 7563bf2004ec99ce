//! # Error Types
//!
//! Domain-specific error types for soko-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  soko-core errors (this file)                                          │
//! │  ├── CoreError        - Checkout/cart domain errors                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Storefront app errors (separate crate)                                │
//! │  └── ApiError         - What the renderer sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Rendering sink         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (counts, phases, indices)
//! 3. Errors are enum variants, never String
//! 4. Every recoverable condition is absorbed at the app boundary and
//!    surfaced as a user-facing notice, never an unhandled fault

use thiserror::Error;

use crate::checkout::CheckoutPhase;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent checkout rule violations or invalid state
/// transitions. They should be caught and translated to user-friendly
/// messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    ///
    /// ## When This Occurs
    /// - Caller passes an id that is not in the static catalog
    /// - Cart lines always reference catalog products at add-time, so
    ///   this can only happen at the add boundary
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Checkout was invoked below the minimum item count.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart has 7 items, minimum is 10
    ///      │
    ///      ▼
    /// CheckoutLocked { count: 7, needed: 3 }
    ///      │
    ///      ▼
    /// UI shows: "Checkout (Add 3 more)"
    /// ```
    #[error("Checkout requires {needed} more item(s) (cart has {count})")]
    CheckoutLocked { count: usize, needed: usize },

    /// The requested transition is not valid from the current phase.
    ///
    /// ## When This Occurs
    /// - Submitting payment without an open checkout
    /// - Opening checkout twice
    /// - Closing a checkout that is not open
    #[error("Checkout is {phase:?}, cannot {action}")]
    InvalidTransition {
        phase: CheckoutPhase,
        action: &'static str,
    },

    /// A payment attempt is already in flight.
    ///
    /// Exactly one attempt may be outstanding at a time; the submit
    /// control must be disabled while Submitting, and a racing submit
    /// lands here instead of creating a second attempt.
    #[error("A payment attempt is already being processed")]
    PaymentInFlight,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when externally supplied input doesn't meet
/// requirements. Used for early validation before checkout logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., non-numeric distance).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CheckoutLocked {
            count: 7,
            needed: 3,
        };
        assert_eq!(
            err.to_string(),
            "Checkout requires 3 more item(s) (cart has 7)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::MustBeNonNegative {
            field: "distance".to_string(),
        };
        assert_eq!(err.to_string(), "distance must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
