//! Money rounding.
//!
//! Every balance update is rounded to [`MONEY_SCALE`] places right after the
//! addition or subtraction, not only at the end, so drift cannot build up
//! across many transactions.
//!
//! Midpoints round toward positive infinity: `2.345 -> 2.35` and
//! `-2.345 -> -2.34`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MONEY_SCALE;

/// Round `value` to `scale` decimal places, midpoints toward +∞.
#[must_use]
pub fn round_money_to(value: Decimal, scale: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(scale, strategy)
}

/// Round `value` to [`MONEY_SCALE`] decimal places.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    round_money_to(value, MONEY_SCALE)
}
