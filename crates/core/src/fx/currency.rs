//! Currency code handling for minor-unit quotes.
//!
//! Some exchanges quote in a currency's minor unit: London in pence (GBp,
//! also written GBX), Johannesburg in cents (ZAc), Tel Aviv in agorot
//! (ILA). FX vendors only quote the major unit, so a price must be scaled
//! to the major unit before any conversion.

use rust_decimal::Decimal;

/// Map a minor-unit code to its major-unit ISO 4217 code.
/// Major-unit codes pass through unchanged.
pub fn normalize_currency_code(code: &str) -> &str {
    match code {
        "GBp" | "GBX" => "GBP",
        "ZAc" | "ZAC" => "ZAR",
        "ILA" => "ILS",
        other => other,
    }
}

/// Divisor that scales an amount in `code` to its major unit.
pub fn minor_unit_divisor(code: &str) -> Decimal {
    match code {
        "GBp" | "GBX" | "ZAc" | "ZAC" | "ILA" => Decimal::ONE_HUNDRED,
        _ => Decimal::ONE,
    }
}
