//! # dealcalc-core: Pure Pricing Logic for DealCalc
//!
//! This crate is the **heart** of DealCalc. It contains the pricing engine
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DealCalc Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │    Input Form ──► Calculate ──► Result Card ──► AI Verdict     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dealcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  engine   │  │ currency  │  │ validation│  │   │
//! │  │   │  Input    │  │  compute  │  │  catalog  │  │   rules   │  │   │
//! │  │   │  Result   │  │  3 modes  │  │  format   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │       ┌────────────────────────┴──────────────────────┐                │
//! │       ▼                                                ▼                │
//! │  dealcalc-history (SQLite)                 dealcalc-advisor (Gemini)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PricingInput, PricingResult, modes, deals)
//! - [`engine`] - The pure `compute(input, mode)` function
//! - [`currency`] - Currency catalog and plain formatting
//! - [`validation`] - Optional caller-side input checks
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `compute` is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Total Engine**: every input yields a result; degenerate numeric
//!    input propagates as `Infinity`/`NaN` rather than erroring
//! 4. **Explicit Errors**: validation failures are typed, never strings
//!
//! ## Example Usage
//!
//! ```rust
//! use dealcalc_core::engine::compute;
//! use dealcalc_core::types::{CalculationMode, DealType, PricingInput};
//!
//! // Three t-shirts on a buy-one-get-one-free deal
//! let input = PricingInput {
//!     original_price: 15.0,
//!     quantity: 3,
//!     deal_type: DealType::Bogo,
//!     ..Default::default()
//! };
//!
//! let result = compute(&input, CalculationMode::Price);
//!
//! // Pay for 2 of 3 units
//! assert_eq!(result.total_cost, 30.0);
//! assert_eq!(result.total_saving, 15.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod engine;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dealcalc_core::PricingInput` instead of
// `use dealcalc_core::types::PricingInput`

pub use engine::compute;
pub use error::ValidationError;
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of history entries retained.
///
/// ## Business Reason
/// History is a convenience view of recent calculations, not an archive.
/// The store keeps the 50 newest entries and evicts the oldest on insert.
pub const HISTORY_CAPACITY: i64 = 50;

/// Maximum quantity accepted by [`validation::validate_quantity`].
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
/// The engine itself accepts any quantity.
pub const MAX_ITEM_QUANTITY: i64 = 999;
