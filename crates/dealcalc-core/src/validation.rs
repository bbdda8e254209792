//! # Validation Module
//!
//! Optional input validation for DealCalc callers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Caller (Rust)                                                 │
//! │  └── THIS MODULE: range checks before display                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                        │
//! │  └── NO validation - total function, takes any input                   │
//! │                                                                         │
//! │  The engine stays total on purpose: rejecting input is a caller        │
//! │  decision, not the engine's. Callers that skip these checks get        │
//! │  IEEE-754 results (Infinity/NaN) for degenerate input.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::currency::CURRENCIES;
use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a currency amount (original price, target price, shipping).
///
/// ## Rules
/// - Must be finite (not NaN or Infinity)
/// - Must be non-negative; zero is allowed (free items, no shipping)
///
/// ## Example
/// ```rust
/// use dealcalc_core::validation::validate_price;
///
/// assert!(validate_price("originalPrice", 10.99).is_ok());
/// assert!(validate_price("originalPrice", 0.0).is_ok());
/// assert!(validate_price("originalPrice", -1.0).is_err());
/// assert!(validate_price("originalPrice", f64::NAN).is_err());
/// ```
pub fn validate_price(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0) - the engine divides by quantity
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_ITEM_QUANTITY as f64,
        });
    }

    Ok(())
}

/// Validates a percentage value (discount rate, tax rate, coupon).
///
/// ## Rules
/// - Must be finite
/// - Must be between 0 and 100 inclusive
pub fn validate_percent(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item display name.
///
/// ## Rules
/// - May be empty (the item name is optional)
/// - Maximum 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "itemName".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a currency code against the offered catalog.
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if !CURRENCIES.iter().any(|c| c.code == code) {
        return Err(ValidationError::NotAllowed {
            field: "currency".to_string(),
            allowed: CURRENCIES.iter().map(|c| c.code.to_string()).collect(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
