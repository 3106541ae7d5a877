//! Decimal helpers for simulator values and numeric settings
//!
//! Simulator values and numeric settings travel as strings. Everything is parsed into
//! `rust_decimal::Decimal` so that repeated small increments never drift.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal number, returning `None` for anything malformed
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse a well-formed integer (optional sign, digits only)
pub fn parse_integer(s: &str) -> Option<i32> {
    let s = s.trim();
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Canonical string form of a value: trailing zeros stripped, no negative zero
pub fn canonical(value: &Decimal) -> String {
    value.normalize().to_string()
}
