//! Conversions between stored integer units and `Decimal` amounts.
//!
//! Salaries are persisted as integer cents and durations as integer minutes.
//! All arithmetic happens on `Decimal`; rounding is applied only when a value
//! leaves the domain (storage or display).

use rust_decimal::prelude::*;

/// Display precision for currency amounts and rates.
pub const DECIMAL_PLACES: u32 = 2;

const MINUTES_PER_HOUR: i64 = 60;

pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Rounds half away from zero to whole cents. `None` if the amount does not fit.
pub fn decimal_to_cents(amount: Decimal) -> Option<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

pub fn minutes_to_hours(minutes: i32) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

/// Rounds to the nearest whole minute.
pub fn hours_to_minutes(hours: Decimal) -> Option<i32> {
    (hours * Decimal::from(MINUTES_PER_HOUR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
}

/// True when `amount` is an exact number of cents.
pub fn is_whole_cents(amount: Decimal) -> bool {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .is_some_and(|cents| cents.fract().is_zero())
}

/// True when `hours` is an exact number of minutes.
pub fn is_whole_minutes(hours: Decimal) -> bool {
    hours
        .checked_mul(Decimal::from(MINUTES_PER_HOUR))
        .is_some_and(|minutes| minutes.fract().is_zero())
}

/// Presentation rounding for currency values.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
