//! # Domain Types
//!
//! Core domain types used throughout DealCalc.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PricingInput   │   │  PricingResult  │   │  HistoryEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  original_price │   │  final_price    │   │  id (UUID)      │       │
//! │  │  discount_value │   │  total_cost     │   │  timestamp      │       │
//! │  │  quantity       │   │  total_saving   │   │  input          │       │
//! │  │  tax/shipping   │   │  tax_amount     │   │  result         │       │
//! │  │  deal_type      │   │  effective_rate │   │  ai_advice      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CalculationMode │   │  DiscountType   │   │    DealType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Price          │   │  Percent        │   │  Standard       │       │
//! │  │  Discount       │   │  Fixed          │   │  Bogo           │       │
//! │  │  Original       │   └─────────────────┘   │  B2g1           │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Boundary types use camelCase field names so the JSON shape matches the
//! TypeScript frontend types verbatim (same reason the enums serialize to
//! the exact string literals the frontend uses: `"PRICE"`, `"percent"`,
//! `"bogo"`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Calculation Mode
// =============================================================================

/// Which quantity the engine solves for.
///
/// ## The Three Modes
/// ```text
/// Price:    original + discount            → final price   (forward)
/// Discount: original + amount paid         → discount rate (reverse)
/// Original: final price + discount rate    → original price (reverse)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationMode {
    /// Forward: apply discounts to an original price.
    Price,
    /// Reverse: derive the realized discount rate from what was paid.
    Discount,
    /// Reverse: reconstruct the original price from the final price.
    Original,
}

impl CalculationMode {
    /// Stable string form, used for TEXT storage and display.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Price => "PRICE",
            CalculationMode::Discount => "DISCOUNT",
            CalculationMode::Original => "ORIGINAL",
        }
    }

    /// Parses the stable string form. Case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PRICE" => Some(CalculationMode::Price),
            "DISCOUNT" => Some(CalculationMode::Discount),
            "ORIGINAL" => Some(CalculationMode::Original),
            _ => None,
        }
    }
}

impl Default for CalculationMode {
    fn default() -> Self {
        CalculationMode::Price
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the original price (0-100 expected).
    Percent,
    /// `discount_value` is an absolute currency amount.
    Fixed,
}

impl DiscountType {
    /// Stable string form, used for TEXT storage and display.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Fixed => "fixed",
        }
    }

    /// Parses the stable string form. Case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percent" => Some(DiscountType::Percent),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

impl Default for DiscountType {
    fn default() -> Self {
        DiscountType::Percent
    }
}

// =============================================================================
// Deal Type
// =============================================================================

/// Promotional bundle selection. Only consulted in PRICE mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    /// Plain discount (percent or fixed) plus optional stacked coupon.
    Standard,
    /// "Buy One, Get One Free" - every second unit is free.
    Bogo,
    /// "Buy Two, Get One Free" - every third unit is free.
    B2g1,
}

impl DealType {
    /// Stable string form, used for TEXT storage and display.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DealType::Standard => "standard",
            DealType::Bogo => "bogo",
            DealType::B2g1 => "b2g1",
        }
    }

    /// Parses the stable string form. Case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(DealType::Standard),
            "bogo" => Some(DealType::Bogo),
            "b2g1" => Some(DealType::B2g1),
            _ => None,
        }
    }
}

impl Default for DealType {
    fn default() -> Self {
        DealType::Standard
    }
}

// =============================================================================
// Pricing Input
// =============================================================================

/// Caller-supplied pricing parameters, immutable per calculation.
///
/// ## Field Interpretation Depends On Mode
/// ```text
/// ┌────────────────────┬───────────────┬────────────────┬────────────────┐
/// │ Field              │ PRICE         │ DISCOUNT       │ ORIGINAL       │
/// ├────────────────────┼───────────────┼────────────────┼────────────────┤
/// │ original_price     │ unit price    │ unit price     │ (ignored)      │
/// │ discount_value     │ applied       │ (ignored)      │ inverted       │
/// │ additional_coupon  │ stacked       │ (ignored)      │ (ignored)      │
/// │ deal_type          │ consulted     │ (ignored)      │ (ignored)      │
/// │ target_price       │ (ignored)     │ amount paid    │ known final    │
/// └────────────────────┴───────────────┴────────────────┴────────────────┘
/// ```
///
/// ## No Range Enforcement
/// Values are taken as-is. Negative prices, zero quantity or a >100%
/// coupon are not rejected here; see [`crate::validation`] for the
/// optional caller-side checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingInput {
    /// Nominal per-unit price before any discount. Currency amount, >= 0 expected.
    pub original_price: f64,

    /// Discount magnitude; interpreted per `discount_type`.
    pub discount_value: f64,

    /// Percent vs fixed interpretation of `discount_value`.
    pub discount_type: DiscountType,

    /// Number of units purchased. The engine divides by this.
    pub quantity: i64,

    /// Tax percentage applied to the subtotal.
    pub tax_rate: f64,

    /// Flat additive shipping amount. Not scaled by quantity.
    pub shipping_cost: f64,

    /// Extra coupon percentage, stacked multiplicatively after the primary
    /// discount (PRICE mode, standard deal only).
    pub additional_coupon: f64,

    /// Currency code. Opaque label with no effect on arithmetic.
    pub currency: String,

    /// Display label for the item, carried through to history and advisory.
    pub item_name: String,

    /// Mode-dependent price: "amount actually paid" in DISCOUNT mode,
    /// "known final price" in ORIGINAL mode. Unused in PRICE mode.
    pub target_price: f64,

    /// Promotional bundle selection (PRICE mode only).
    pub deal_type: DealType,
}

impl Default for PricingInput {
    fn default() -> Self {
        PricingInput {
            original_price: 0.0,
            discount_value: 0.0,
            discount_type: DiscountType::Percent,
            quantity: 1,
            tax_rate: 0.0,
            shipping_cost: 0.0,
            additional_coupon: 0.0,
            currency: "USD".to_string(),
            item_name: String::new(),
            target_price: 0.0,
            deal_type: DealType::Standard,
        }
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// The computed outcome of one calculation. Immutable once constructed.
///
/// `subtotal` (final unit price × quantity) is an intermediate that feeds
/// `tax_amount` and `total_cost`; it is deliberately not a result field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Effective per-unit price after all discounts (PRICE mode) or the
    /// unit price used/derived (other modes).
    pub final_price: f64,

    /// subtotal + tax_amount + shipping_cost.
    pub total_cost: f64,

    /// Aggregate currency amount saved across all units.
    pub total_saving: f64,

    /// subtotal × tax_rate / 100.
    pub tax_amount: f64,

    /// total_cost / quantity. Non-finite when quantity is 0.
    pub price_per_unit: f64,

    /// Realized percentage saved relative to the original unit price.
    /// Zero when the original unit price is zero.
    pub effective_discount_rate: f64,

    /// Echo of the mode that produced this result.
    pub calculation_mode: CalculationMode,
}

// =============================================================================
// History Entry
// =============================================================================

/// One persisted calculation: the input, its result, and optional advisory
/// text. At most [`crate::HISTORY_CAPACITY`] entries are retained, newest
/// first (enforced by the history store, not here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the calculation was performed.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// The parameters the calculation ran with.
    #[serde(flatten)]
    pub input: PricingInput,

    /// The computed outcome.
    #[serde(flatten)]
    pub result: PricingResult,

    /// Advisory verdict text, if one was requested.
    pub ai_advice: Option<String>,
}

impl HistoryEntry {
    /// Creates a fresh entry with a new id and the current time.
    pub fn new(input: PricingInput, result: PricingResult) -> Self {
        HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            input,
            result,
            ai_advice: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_string_round_trip() {
        for mode in [
            CalculationMode::Price,
            CalculationMode::Discount,
            CalculationMode::Original,
        ] {
            assert_eq!(CalculationMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(CalculationMode::parse("price"), None);
    }

    #[test]
    fn test_enum_serde_literals() {
        // The frontend depends on these exact literals.
        assert_eq!(
            serde_json::to_string(&CalculationMode::Price).unwrap(),
            "\"PRICE\""
        );
        assert_eq!(
            serde_json::to_string(&DiscountType::Percent).unwrap(),
            "\"percent\""
        );
        assert_eq!(serde_json::to_string(&DealType::B2g1).unwrap(), "\"b2g1\"");
    }

    #[test]
    fn test_input_defaults() {
        let input = PricingInput::default();
        assert_eq!(input.quantity, 1);
        assert_eq!(input.currency, "USD");
        assert_eq!(input.discount_type, DiscountType::Percent);
        assert_eq!(input.deal_type, DealType::Standard);
        assert_eq!(input.target_price, 0.0);
    }

    #[test]
    fn test_input_deserializes_partial_json() {
        // Missing fields fall back to defaults, matching the frontend's
        // optional fields (targetPrice, dealType).
        let input: PricingInput =
            serde_json::from_str(r#"{"originalPrice": 100.0, "discountValue": 20.0}"#).unwrap();
        assert_eq!(input.original_price, 100.0);
        assert_eq!(input.quantity, 1);
        assert_eq!(input.deal_type, DealType::Standard);
    }

    #[test]
    fn test_history_entry_ids_unique() {
        let input = PricingInput::default();
        let result = crate::engine::compute(&input, CalculationMode::Price);
        let a = HistoryEntry::new(input.clone(), result.clone());
        let b = HistoryEntry::new(input, result);
        assert_ne!(a.id, b.id);
        assert!(a.ai_advice.is_none());
    }
}
