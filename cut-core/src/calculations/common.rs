//! Common helpers for amounts.
//!
//! Rounding, text parsing and rupee formatting used by the calculator, the
//! summary renderer and the front ends.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Symbol prefixed to every amount in a summary.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use cut_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(19.994)), dec!(19.99));
/// assert_eq!(round_half_up(dec!(19.995)), dec!(20.00));
/// assert_eq!(round_half_up(dec!(-19.995)), dec!(-20.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Error returned when amount text is not a plain decimal number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount '{input}'")]
pub struct ParseAmountError {
    input: String,
}

/// Normalizes amount text: trims whitespace and removes `,` thousands separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses amount text typed into a form field.
///
/// Returns `Ok(None)` for empty or whitespace-only input so callers can decide
/// whether the field is required. Accepts `,` as a thousands separator;
/// `_` digit separators are rejected.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use cut_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount("1,250.50").unwrap(), Some(dec!(1250.50)));
/// assert_eq!(parse_amount("  ").unwrap(), None);
/// assert!(parse_amount("ten").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Option<Decimal>, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }

    let invalid = || ParseAmountError {
        input: s.to_string(),
    };
    if normalized.contains('_') {
        return Err(invalid());
    }
    normalized.parse().map(Some).map_err(|_| invalid())
}

/// Formats an amount in rupees with two decimals, e.g. `₹1250.50`.
pub fn format_rupees(value: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{:.2}", round_half_up(value))
}

/// Formats a percentage with two decimals, e.g. `20.00%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}
