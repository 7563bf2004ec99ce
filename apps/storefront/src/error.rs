//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in Soko                                  │
//! │                                                                         │
//! │  Renderer                     Session Layer                             │
//! │  ────────                     ─────────────                             │
//! │                                                                         │
//! │  add_to_cart("mystery")                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown product? ── CoreError::ProductNotFound ──┐              │  │
//! │  │         │                                         ▼              │  │
//! │  │  Gate violation? ─── CoreError::CheckoutLocked ── ApiError ────► │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  NOTE: a declined payment is NOT an ApiError. It is a successful       │
//! │  command returning a Failed PaymentNotice; the user may resubmit.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use soko_core::types::UnknownProvider;
use soko_core::CoreError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what a frontend would receive when a command fails:
/// ```json
/// {
///   "code": "CHECKOUT_LOCKED",
///   "message": "Checkout requires 3 more item(s) (cart has 7)"
/// }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart is below the checkout minimum
    CheckoutLocked,

    /// A payment attempt is already in flight
    PaymentInFlight,

    /// Transition not allowed from the current checkout phase
    BusinessLogic,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CheckoutLocked { .. } => {
                ApiError::new(ErrorCode::CheckoutLocked, err.to_string())
            }
            CoreError::PaymentInFlight => ApiError::new(ErrorCode::PaymentInFlight, err.to_string()),
            CoreError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts provider parse failures to API errors.
impl From<UnknownProvider> for ApiError {
    fn from(err: UnknownProvider) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ProductNotFound("ghost".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("ghost"));

        let err: ApiError = CoreError::CheckoutLocked { count: 7, needed: 3 }.into();
        assert_eq!(err.code, ErrorCode::CheckoutLocked);

        let err: ApiError = CoreError::PaymentInFlight.into();
        assert_eq!(err.code, ErrorCode::PaymentInFlight);
    }

    #[test]
    fn test_display_format() {
        let err = ApiError::not_found("Product", "rice-1kg");
        assert_eq!(err.to_string(), "[NotFound] Product not found: rice-1kg");
    }
}
