//! # Error Types
//!
//! Validation error types for dealcalc-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dealcalc-core (this file)                                              │
//! │  └── ValidationError  - Input validation failures (caller-side)        │
//! │                                                                         │
//! │  dealcalc-history (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  dealcalc-advisor (separate crate)                                      │
//! │  └── AdvisorError     - AI service failures (internal only)            │
//! │                                                                         │
//! │  NOTE: the pricing engine itself never errors. Every input             │
//! │  combination yields a result value; degenerate numeric input           │
//! │  propagates as Infinity/NaN per IEEE-754. ValidationError exists       │
//! │  for callers that want to reject such input before display.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet the expected ranges.
/// Used for early validation before a calculation result is displayed;
/// the engine itself accepts any input (see [`crate::engine::compute`]).
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
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be a finite number (not NaN or Infinity).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================
