//! Fixed two-decimal number formatting
//!
//! Values are taken at their shortest round-trip decimal representation and
//! rounded half away from zero, so `150.005` renders as `150.01` even though
//! the nearest binary double sits just below the midpoint.

use rust_decimal::prelude::*;

/// Marker rendered for absent or undecodable values
pub const NOT_AVAILABLE: &str = "N/A";

/// Convert a finite double to its shortest decimal representation
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Round to two places, always keeping two fractional digits
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Format a decimal with exactly two fractional digits
pub fn format_decimal(value: Option<Decimal>) -> String {
    match value {
        Some(v) => round_cents(v).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a number with exactly two fractional digits
pub fn format_number(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => match to_decimal(v) {
            Some(d) => format_decimal(Some(d)),
            // beyond Decimal's range, fall back to float formatting
            None => format!("{:.2}", v),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a dollar amount with exactly two fractional digits
pub fn format_money(value: Option<f64>) -> String {
    let formatted = format_number(value);
    if formatted == NOT_AVAILABLE {
        formatted
    } else {
        format!("${}", formatted)
    }
}

/// Exact product of two optional values, e.g. price times shares
pub fn product(a: Option<f64>, b: Option<f64>) -> Option<Decimal> {
    let a = to_decimal(a?)?;
    let b = to_decimal(b?)?;
    a.checked_mul(b)
}

/// Format a decimal dollar amount
pub fn format_money_decimal(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${}", format_decimal(Some(v))),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format the dollar product of two values, e.g. price times shares
///
/// Only absent or non-finite inputs render as N/A. A product beyond
/// Decimal's range falls back to float formatting.
pub fn format_money_product(a: Option<f64>, b: Option<f64>) -> String {
    let (a, b) = match (a.filter(|v| v.is_finite()), b.filter(|v| v.is_finite())) {
        (Some(a), Some(b)) => (a, b),
        _ => return NOT_AVAILABLE.to_string(),
    };
    match product(Some(a), Some(b)) {
        Some(total) => format_money_decimal(Some(total)),
        None if (a * b).is_finite() => format!("${:.2}", a * b),
        None => NOT_AVAILABLE.to_string(),
    }
}
