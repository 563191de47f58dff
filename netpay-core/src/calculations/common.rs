//! Shared helpers for tax calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoints away from zero), the standard convention for
/// monetary results.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero from below.
///
/// Used wherever a derived amount must not go negative: slab widths under
/// malformed caps, taxable bases after deductions, residual tax after a
/// credit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::common::floor_zero;
///
/// assert_eq!(floor_zero(dec!(-50.00)), dec!(0));
/// assert_eq!(floor_zero(dec!(50.00)), dec!(50.00));
/// ```
pub fn floor_zero(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}
