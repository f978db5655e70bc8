//! Locale-invariant money arithmetic.
//!
//! All monetary values in the corpus are `rust_decimal::Decimal` rounded to
//! two decimal places, half away from zero. Persisted documents always use a
//! decimal point and no grouping separators, so `Decimal`'s `Display` and
//! `FromStr` are the only formatting/parsing paths.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half away from zero.
pub fn round_money(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Tolerant amount parse for the scan-back path.
///
/// Blank or malformed input becomes zero instead of failing the unit.
pub fn parse_amount(s: &str) -> Decimal {
    let t = s.trim();
    if t.is_empty() {
        return Decimal::ZERO;
    }
    t.parse().unwrap_or(Decimal::ZERO)
}
