//! # Pricing Engine
//!
//! The pure calculation core of DealCalc.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute(input, mode)                               │
//! │                                                                         │
//! │                    ┌──────── mode ────────┐                             │
//! │                    ▼          ▼           ▼                             │
//! │                 PRICE      DISCOUNT    ORIGINAL                         │
//! │                    │          │           │                             │
//! │          ┌─ deal_type ─┐      │           │                             │
//! │          ▼      ▼      ▼      │           │                             │
//! │      standard  bogo  b2g1     │           │                             │
//! │          │      │      │      │           │                             │
//! │          └──────┴──────┴──────┴───────────┘                             │
//! │                         │                                               │
//! │                         ▼                                               │
//! │        common tail: tax, shipping, total cost,                          │
//! │        total saving, price per unit                                     │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                   PricingResult                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Garbage In, Garbage Out
//! `compute` is a total function: it never errors or panics, for any input.
//! Out-of-range values (negative prices, zero quantity, >100% coupons) flow
//! through plain `f64` arithmetic and can produce `Infinity`/`NaN` results.
//! Callers that need guarded input use [`crate::validation`] first.

use crate::types::{CalculationMode, DealType, DiscountType, PricingInput, PricingResult};

/// What each mode branch resolves before the common tail runs.
struct ModeOutcome {
    /// Per-unit price before any discount (given or derived).
    unit_original: f64,
    /// Per-unit price after all discounts (given or derived).
    unit_final: f64,
    /// unit_final × quantity, except in bundle deals where it is
    /// paid_units × unit_original (the exact amount charged).
    subtotal: f64,
    /// Per-unit amount saved, used for the effective discount rate.
    /// Mode-specific: clamped in DISCOUNT, nominal discount in PRICE.
    savings_per_unit: f64,
    /// Aggregate amount saved across all units. Usually
    /// unit_original × quantity − subtotal; DISCOUNT mode clamps it to
    /// zero when more was paid than the original price.
    total_saving: f64,
}

/// Computes a pricing outcome for the given input and mode.
///
/// Pure and deterministic: identical input and mode yield bit-identical
/// results, with no hidden state. See the module docs for the
/// garbage-in-garbage-out contract.
///
/// ## Example
/// ```rust
/// use dealcalc_core::engine::compute;
/// use dealcalc_core::types::{CalculationMode, PricingInput};
///
/// let input = PricingInput {
///     original_price: 100.0,
///     discount_value: 20.0,
///     ..Default::default()
/// };
/// let result = compute(&input, CalculationMode::Price);
/// assert_eq!(result.final_price, 80.0);
/// assert_eq!(result.total_saving, 20.0);
/// ```
pub fn compute(input: &PricingInput, mode: CalculationMode) -> PricingResult {
    let quantity = input.quantity as f64;

    let outcome = match mode {
        CalculationMode::Price => price_mode(input, quantity),
        CalculationMode::Discount => discount_mode(input, quantity),
        CalculationMode::Original => original_mode(input, quantity),
    };

    // Common tail: totals shared by all modes.
    let tax_amount = outcome.subtotal * (input.tax_rate / 100.0);
    let total_cost = outcome.subtotal + tax_amount + input.shipping_cost;

    let effective_discount_rate = if outcome.unit_original > 0.0 {
        (outcome.savings_per_unit / outcome.unit_original) * 100.0
    } else {
        0.0
    };

    PricingResult {
        final_price: outcome.unit_final,
        total_cost,
        total_saving: outcome.total_saving,
        tax_amount,
        // Unguarded division: quantity 0 yields Infinity or NaN.
        price_per_unit: total_cost / quantity,
        effective_discount_rate,
        calculation_mode: mode,
    }
}

/// Forward calculation: original price → final price.
fn price_mode(input: &PricingInput, quantity: f64) -> ModeOutcome {
    match input.deal_type {
        DealType::Standard => {
            let mut discount_amount;
            let mut base_price;
            match input.discount_type {
                DiscountType::Percent => {
                    discount_amount = input.original_price * (input.discount_value / 100.0);
                    base_price = input.original_price - discount_amount;
                }
                DiscountType::Fixed => {
                    // The nominal discount stays discount_value even when it
                    // exceeds the price; only the charged price floors at 0.
                    discount_amount = input.discount_value;
                    base_price = (input.original_price - input.discount_value).max(0.0);
                }
            }

            // Coupon stacks multiplicatively on the already-discounted price.
            if input.additional_coupon > 0.0 {
                let extra = base_price * (input.additional_coupon / 100.0);
                base_price -= extra;
                discount_amount += extra;
            }

            let subtotal = base_price * quantity;
            ModeOutcome {
                unit_original: input.original_price,
                unit_final: base_price,
                subtotal,
                savings_per_unit: discount_amount,
                total_saving: input.original_price * quantity - subtotal,
            }
        }
        DealType::Bogo => {
            // Every second unit free: pay for ceil(quantity / 2) units.
            let paid_units = (input.quantity + 1) / 2;
            bundle_outcome(input.original_price, paid_units, quantity)
        }
        DealType::B2g1 => {
            // Every third unit free: pay for 2 of each full group of 3,
            // plus the remainder.
            let paid_units = (input.quantity / 3) * 2 + input.quantity % 3;
            bundle_outcome(input.original_price, paid_units, quantity)
        }
    }
}

/// Shared derivation for bundle deals. `discount_value`, `discount_type`
/// and `additional_coupon` are ignored by these deals.
fn bundle_outcome(unit_original: f64, paid_units: i64, quantity: f64) -> ModeOutcome {
    let subtotal = paid_units as f64 * unit_original;
    let unit_final = subtotal / quantity;
    ModeOutcome {
        unit_original,
        unit_final,
        subtotal,
        savings_per_unit: unit_original - unit_final,
        total_saving: unit_original * quantity - subtotal,
    }
}

/// Reverse calculation: original price + amount paid → discount rate.
/// Paying more than the original price reports zero savings, not negative.
fn discount_mode(input: &PricingInput, quantity: f64) -> ModeOutcome {
    let savings = (input.original_price - input.target_price).max(0.0);
    ModeOutcome {
        unit_original: input.original_price,
        unit_final: input.target_price,
        subtotal: input.target_price * quantity,
        savings_per_unit: savings,
        // Clamped per-unit savings carry through to the aggregate too.
        total_saving: savings * quantity,
    }
}

/// Reverse calculation: final price + discount → original price.
///
/// A percent discount of 100% or more cannot be inverted; the engine
/// returns the final price unchanged (a zero-discount result) instead of
/// dividing by zero or a negative. Kept as-is from the original system.
fn original_mode(input: &PricingInput, quantity: f64) -> ModeOutcome {
    let derived_original = match input.discount_type {
        DiscountType::Percent => {
            let rate = input.discount_value / 100.0;
            if rate < 1.0 {
                input.target_price / (1.0 - rate)
            } else {
                input.target_price
            }
        }
        DiscountType::Fixed => input.target_price + input.discount_value,
    };

    ModeOutcome {
        unit_original: derived_original,
        unit_final: input.target_price,
        subtotal: input.target_price * quantity,
        savings_per_unit: derived_original - input.target_price,
        total_saving: (derived_original - input.target_price) * quantity,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn price_input() -> PricingInput {
        PricingInput {
            original_price: 100.0,
            discount_value: 20.0,
            discount_type: DiscountType::Percent,
            quantity: 1,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------
    // PRICE mode, standard deals
    // -------------------------------------------------------------------

    #[test]
    fn test_percent_discount_basic() {
        // 100 at 20% off, no tax/shipping/coupon.
        let result = compute(&price_input(), CalculationMode::Price);

        assert_close(result.final_price, 80.0);
        assert_close(result.total_cost, 80.0);
        assert_close(result.total_saving, 20.0);
        assert_close(result.tax_amount, 0.0);
        assert_close(result.effective_discount_rate, 20.0);
        assert_eq!(result.calculation_mode, CalculationMode::Price);
    }

    #[test]
    fn test_coupon_stacks_multiplicatively() {
        // 100 at 20% off → 80, then a 10% coupon on 80 → 72.
        // Savings are 28, not the additive 30.
        let input = PricingInput {
            additional_coupon: 10.0,
            ..price_input()
        };
        let result = compute(&input, CalculationMode::Price);

        assert_close(result.final_price, 72.0);
        assert_close(result.total_saving, 28.0);
        assert_close(result.effective_discount_rate, 28.0);
    }

    #[test]
    fn test_coupon_ignored_when_zero_or_negative() {
        let mut input = price_input();
        input.additional_coupon = 0.0;
        let base = compute(&input, CalculationMode::Price);

        input.additional_coupon = -5.0;
        let negative = compute(&input, CalculationMode::Price);

        assert_eq!(base.final_price, negative.final_price);
    }

    #[test]
    fn test_fixed_discount() {
        let input = PricingInput {
            original_price: 50.0,
            discount_value: 15.0,
            discount_type: DiscountType::Fixed,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Price);

        assert_close(result.final_price, 35.0);
        assert_close(result.total_saving, 15.0);
        assert_close(result.effective_discount_rate, 30.0);
    }

    #[test]
    fn test_fixed_discount_floors_price_at_zero() {
        // Discount larger than the price: charged price floors at 0, but
        // the nominal discount feeds the rate, which exceeds 100%.
        let input = PricingInput {
            original_price: 10.0,
            discount_value: 15.0,
            discount_type: DiscountType::Fixed,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Price);

        assert_close(result.final_price, 0.0);
        assert_close(result.total_saving, 10.0);
        assert_close(result.effective_discount_rate, 150.0);
    }

    #[test]
    fn test_tax_and_shipping() {
        // final 80 × 2 = 160 subtotal, 10% tax = 16, shipping 5 → 181.
        let input = PricingInput {
            quantity: 2,
            tax_rate: 10.0,
            shipping_cost: 5.0,
            ..price_input()
        };
        let result = compute(&input, CalculationMode::Price);

        assert_close(result.tax_amount, 16.0);
        assert_close(result.total_cost, 181.0);
        assert_close(result.price_per_unit, 90.5);
        assert_close(result.total_saving, 40.0);
    }

    #[test]
    fn test_shipping_is_flat_not_per_unit() {
        let one = PricingInput {
            shipping_cost: 7.5,
            ..price_input()
        };
        let five = PricingInput {
            quantity: 5,
            ..one.clone()
        };

        let r1 = compute(&one, CalculationMode::Price);
        let r5 = compute(&five, CalculationMode::Price);

        // Subtotals scale with quantity; the shipping contribution doesn't.
        assert_close(r1.total_cost - 80.0, 7.5);
        assert_close(r5.total_cost - 400.0, 7.5);
    }

    #[test]
    fn test_final_never_exceeds_original_for_valid_percent() {
        for discount in [0.0, 0.5, 10.0, 50.0, 99.9, 100.0] {
            let input = PricingInput {
                discount_value: discount,
                ..price_input()
            };
            let result = compute(&input, CalculationMode::Price);
            assert!(
                result.final_price <= input.original_price,
                "discount {discount}%"
            );
        }
    }

    // -------------------------------------------------------------------
    // PRICE mode, bundle deals
    // -------------------------------------------------------------------

    fn bogo_input(quantity: i64) -> PricingInput {
        PricingInput {
            original_price: 10.0,
            quantity,
            deal_type: DealType::Bogo,
            // Should all be ignored by the bundle branch:
            discount_value: 50.0,
            additional_coupon: 25.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_bogo_paid_units() {
        // quantity → paid units: 1→1, 2→1, 3→2 (subtotal = paid × 10).
        for (quantity, paid) in [(1, 1.0), (2, 1.0), (3, 2.0), (4, 2.0), (7, 4.0)] {
            let result = compute(&bogo_input(quantity), CalculationMode::Price);
            assert_close(result.total_cost, paid * 10.0);
        }
    }

    #[test]
    fn test_bogo_effective_rate_at_two() {
        // Two for the price of one: 50% effective discount.
        let result = compute(&bogo_input(2), CalculationMode::Price);
        assert_close(result.final_price, 5.0);
        assert_close(result.total_saving, 10.0);
        assert_close(result.effective_discount_rate, 50.0);
    }

    #[test]
    fn test_bogo_single_unit_no_discount() {
        let result = compute(&bogo_input(1), CalculationMode::Price);
        assert_close(result.final_price, 10.0);
        assert_close(result.total_saving, 0.0);
        assert_close(result.effective_discount_rate, 0.0);
    }

    #[test]
    fn test_bogo_ignores_discount_fields() {
        let mut input = bogo_input(2);
        let with_fields = compute(&input, CalculationMode::Price);

        input.discount_value = 0.0;
        input.additional_coupon = 0.0;
        let without_fields = compute(&input, CalculationMode::Price);

        assert_eq!(with_fields, without_fields);
    }

    #[test]
    fn test_b2g1_paid_units() {
        // quantity → paid units: 1→1, 2→2, 3→2, 4→3, 6→4, 7→5.
        for (quantity, paid) in [(1, 1.0), (2, 2.0), (3, 2.0), (4, 3.0), (6, 4.0), (7, 5.0)] {
            let input = PricingInput {
                deal_type: DealType::B2g1,
                ..bogo_input(quantity)
            };
            let result = compute(&input, CalculationMode::Price);
            assert_close(result.total_cost, paid * 10.0);
        }
    }

    #[test]
    fn test_b2g1_effective_rate_at_three() {
        // Three for the price of two: one third off.
        let input = PricingInput {
            deal_type: DealType::B2g1,
            ..bogo_input(3)
        };
        let result = compute(&input, CalculationMode::Price);
        assert_close(result.total_saving, 10.0);
        assert_close(result.effective_discount_rate, 100.0 / 3.0);
    }

    // -------------------------------------------------------------------
    // DISCOUNT mode
    // -------------------------------------------------------------------

    #[test]
    fn test_discount_mode_derives_rate() {
        let input = PricingInput {
            original_price: 100.0,
            target_price: 75.0,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Discount);

        assert_close(result.final_price, 75.0);
        assert_close(result.total_saving, 25.0);
        assert_close(result.effective_discount_rate, 25.0);
        assert_eq!(result.calculation_mode, CalculationMode::Discount);
    }

    #[test]
    fn test_discount_mode_clamps_negative_savings() {
        // Paid more than the original price: zero savings, zero rate.
        let input = PricingInput {
            original_price: 10.0,
            target_price: 15.0,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Discount);

        assert_close(result.effective_discount_rate, 0.0);
        assert_close(result.total_saving, 0.0);
    }

    #[test]
    fn test_discount_mode_ignores_discount_fields() {
        let mut input = PricingInput {
            original_price: 100.0,
            target_price: 60.0,
            discount_value: 99.0,
            additional_coupon: 50.0,
            deal_type: DealType::Bogo,
            ..Default::default()
        };
        let noisy = compute(&input, CalculationMode::Discount);

        input.discount_value = 0.0;
        input.additional_coupon = 0.0;
        input.deal_type = DealType::Standard;
        let clean = compute(&input, CalculationMode::Discount);

        assert_eq!(noisy, clean);
    }

    // -------------------------------------------------------------------
    // ORIGINAL mode
    // -------------------------------------------------------------------

    #[test]
    fn test_original_mode_percent() {
        // 80 was the final price after 20% off → original was 100.
        let input = PricingInput {
            target_price: 80.0,
            discount_value: 20.0,
            discount_type: DiscountType::Percent,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Original);

        assert_close(result.final_price, 80.0);
        assert_close(result.total_saving, 20.0);
        assert_close(result.effective_discount_rate, 20.0);
    }

    #[test]
    fn test_original_mode_fixed() {
        let input = PricingInput {
            target_price: 80.0,
            discount_value: 20.0,
            discount_type: DiscountType::Fixed,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Original);

        // derived original = 80 + 20 = 100
        assert_close(result.total_saving, 20.0);
        assert_close(result.effective_discount_rate, 20.0);
    }

    #[test]
    fn test_original_mode_full_discount_fallback() {
        // A 100%+ percent discount cannot be inverted: the final price is
        // returned unchanged, producing a zero-discount result.
        for discount in [100.0, 150.0] {
            let input = PricingInput {
                target_price: 80.0,
                discount_value: discount,
                discount_type: DiscountType::Percent,
                ..Default::default()
            };
            let result = compute(&input, CalculationMode::Original);

            assert_close(result.final_price, 80.0);
            assert_close(result.total_saving, 0.0);
            assert_close(result.effective_discount_rate, 0.0);
        }
    }

    #[test]
    fn test_price_then_original_round_trip() {
        // PRICE forward, then ORIGINAL on the final price recovers the
        // original, for any percent rate below 100.
        for rate in [0.0, 5.0, 20.0, 33.3, 75.0, 99.0] {
            let forward = PricingInput {
                original_price: 149.99,
                discount_value: rate,
                discount_type: DiscountType::Percent,
                ..Default::default()
            };
            let priced = compute(&forward, CalculationMode::Price);

            let reverse = PricingInput {
                target_price: priced.final_price,
                discount_value: rate,
                discount_type: DiscountType::Percent,
                ..Default::default()
            };
            let recovered = compute(&reverse, CalculationMode::Original);

            // derived original = target / (1 - r), surfaced via savings:
            // original = final + total_saving for quantity 1.
            assert!(
                (recovered.final_price + recovered.total_saving - 149.99).abs() < 1e-6,
                "rate {rate}%"
            );
        }
    }

    // -------------------------------------------------------------------
    // Degenerate input (documented garbage-in-garbage-out)
    // -------------------------------------------------------------------

    #[test]
    fn test_zero_quantity_yields_non_finite_per_unit() {
        let input = PricingInput {
            quantity: 0,
            shipping_cost: 5.0,
            ..price_input()
        };
        let result = compute(&input, CalculationMode::Price);

        // subtotal 0, total cost = shipping; shipping / 0 = +Infinity.
        assert_close(result.total_cost, 5.0);
        assert!(result.price_per_unit.is_infinite());
    }

    #[test]
    fn test_zero_quantity_zero_cost_yields_nan() {
        let input = PricingInput {
            quantity: 0,
            ..price_input()
        };
        let result = compute(&input, CalculationMode::Price);
        assert!(result.price_per_unit.is_nan());
    }

    #[test]
    fn test_zero_original_price_yields_zero_rate() {
        let input = PricingInput {
            original_price: 0.0,
            discount_value: 20.0,
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Price);
        assert_close(result.effective_discount_rate, 0.0);
    }

    #[test]
    fn test_currency_label_has_no_arithmetic_effect() {
        let usd = price_input();
        let jpy = PricingInput {
            currency: "JPY".to_string(),
            ..price_input()
        };

        let a = compute(&usd, CalculationMode::Price);
        let b = compute(&jpy, CalculationMode::Price);
        assert_eq!(a.final_price, b.final_price);
        assert_eq!(a.total_cost, b.total_cost);
    }

    #[test]
    fn test_compute_is_pure() {
        let input = PricingInput {
            quantity: 3,
            tax_rate: 8.25,
            shipping_cost: 4.99,
            additional_coupon: 5.0,
            ..price_input()
        };
        let a = compute(&input, CalculationMode::Price);
        let b = compute(&input, CalculationMode::Price);

        // Bit-identical, not merely close.
        assert_eq!(a, b);
    }
}
