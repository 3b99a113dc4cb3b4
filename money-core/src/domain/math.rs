//! Rounding helpers shared by money arithmetic.
//!
//! All rounding is half away from zero. Decimal amounts are scaled through
//! `Decimal` so that midpoints written in base ten (`1.005`) round up.

use rust_decimal::prelude::*;

pub(crate) fn pow10(exponent: i32) -> f64 {
    10f64.powi(exponent)
}

/// Rounds to the nearest integer minor unit.
pub(crate) fn round_to_minor(value: f64) -> i64 {
    // `as` saturates on overflow and maps NaN to 0.
    value.round() as i64
}

/// Converts a decimal amount to whole minor units at `places` decimals.
pub(crate) fn to_minor_units(decimal: f64, places: u32) -> i64 {
    exact_minor_units(decimal, places).unwrap_or_else(|| {
        // Out of Decimal's range or not finite.
        round_to_minor(decimal * pow10(i32::try_from(places).unwrap_or(i32::MAX)))
    })
}

fn exact_minor_units(decimal: f64, places: u32) -> Option<i64> {
    let factor = Decimal::from(10i64.checked_pow(places)?);
    Decimal::from_f64(decimal)?
        .checked_mul(factor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// `1 + percent/100`, rounded to `places` decimal places.
pub(crate) fn percent_multiplier(percent: f64, places: u32) -> f64 {
    Decimal::from_f64(percent)
        .and_then(|percent| percent.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|fraction| fraction.checked_add(Decimal::ONE))
        .map(|multiplier| {
            multiplier.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|multiplier| multiplier.to_f64())
        .unwrap_or_else(|| {
            let factor = pow10(i32::try_from(places).unwrap_or(i32::MAX));
            ((1.0 + percent / 100.0) * factor).round() / factor
        })
}

/// Rounds an integer to the nearest multiple of `10^digits`.
///
/// Non-positive `digits` leave the value unchanged.
pub(crate) fn round_to_power_of_ten(value: i64, digits: i32) -> i64 {
    if digits <= 0 {
        return value;
    }
    let Some(step) = 10i128.checked_pow(digits.unsigned_abs()) else {
        return 0;
    };

    let value = i128::from(value);
    let rounded = (value.abs() + step / 2) / step * step * value.signum();

    i64::try_from(rounded).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
