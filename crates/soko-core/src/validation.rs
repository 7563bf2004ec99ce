//! # Validation Module
//!
//! Input validation utilities for externally supplied values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input surface (form/terminal)                                │
//! │  ├── Basic presence checks, immediate feedback                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any checkout logic runs)                 │
//! │  ├── Distance: recovered to 0 on bad input (never an error)            │
//! │  ├── Phone: presence only, passed through to the gateway as-is         │
//! │  └── Price: non-negative whole shillings                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout state machine (typed transition errors)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Phone Number
// =============================================================================

/// Validates a mobile-money phone number.
///
/// ## Rules
/// - Must not be empty (the payment form marks it required)
/// - No format or length checking beyond that: the number is passed
///   through to the payment gateway unvalidated
///
/// ## Returns
/// The trimmed phone string.
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    Ok(phone.to_string())
}

// =============================================================================
// Price
// =============================================================================

/// Validates a catalog price in whole shillings.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
pub fn validate_price_ugx(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Product Name
// =============================================================================

/// Validates a catalog product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("0772123456").unwrap(), "0772123456");
        assert_eq!(validate_phone("  +256 772 123456 ").unwrap(), "+256 772 123456");

        assert!(validate_phone("").is_err());
        assert!(validate_phone("   ").is_err());

        // Presence is the only rule; odd or long numbers pass through
        let long = "9".repeat(30);
        assert_eq!(validate_phone(&long).unwrap(), long);
    }

    #[test]
    fn test_validate_price_ugx() {
        assert!(validate_price_ugx(0).is_ok());
        assert!(validate_price_ugx(5_000).is_ok());
        assert!(validate_price_ugx(-100).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Matooke (Bunch)").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }
}
