//! # Currency Catalog
//!
//! The currencies the calculator offers and a plain formatting helper.
//!
//! ## Labels Only
//! A currency here is a display label: it never participates in arithmetic
//! and there is no conversion between currencies. Locale-aware number
//! formatting is the frontend's job; [`format_amount`] is the simple
//! `symbol + two decimals` form used for logs, history dumps and the
//! advisory prompt.

use serde::Serialize;
use ts_rs::TS;

/// A selectable currency option. Serialized out to callers; never read
/// back in (the catalog is static).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyOption {
    /// ISO 4217 code ("USD", "EUR", ...).
    pub code: &'static str,
    /// Display symbol ("$", "€", ...).
    pub symbol: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// BCP 47 locale tag the frontend formats with.
    pub locale: &'static str,
}

/// The currencies offered by the calculator. First entry (USD) is the
/// fallback for unknown codes.
pub const CURRENCIES: &[CurrencyOption] = &[
    CurrencyOption {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
        locale: "en-US",
    },
    CurrencyOption {
        code: "INR",
        symbol: "₹",
        name: "Indian Rupee",
        locale: "en-IN",
    },
    CurrencyOption {
        code: "EUR",
        symbol: "€",
        name: "Euro",
        locale: "de-DE",
    },
    CurrencyOption {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
        locale: "en-GB",
    },
    CurrencyOption {
        code: "JPY",
        symbol: "¥",
        name: "Japanese Yen",
        locale: "ja-JP",
    },
    CurrencyOption {
        code: "CAD",
        symbol: "C$",
        name: "Canadian Dollar",
        locale: "en-CA",
    },
    CurrencyOption {
        code: "AUD",
        symbol: "A$",
        name: "Australian Dollar",
        locale: "en-AU",
    },
];

/// Looks up a currency by code, falling back to USD for unknown codes.
pub fn find_currency(code: &str) -> &'static CurrencyOption {
    CURRENCIES
        .iter()
        .find(|c| c.code == code)
        .unwrap_or(&CURRENCIES[0])
}

/// Formats an amount as `symbol` + two decimals, e.g. `"$10.99"`.
///
/// ## Example
/// ```rust
/// use dealcalc_core::currency::format_amount;
///
/// assert_eq!(format_amount(10.99, "USD"), "$10.99");
/// assert_eq!(format_amount(1299.5, "EUR"), "€1299.50");
/// ```
pub fn format_amount(amount: f64, code: &str) -> String {
    format!("{}{:.2}", find_currency(code).symbol, amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
