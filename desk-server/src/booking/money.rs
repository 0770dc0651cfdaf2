//! Money calculation utilities using rust_decimal for precision
//!
//! Stay charges are computed as `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Charge for a stay: nightly price × number of nights, rounded half-up to
/// cents.
pub fn stay_charge(price_per_night: f64, nights: i64) -> f64 {
    let charge = to_decimal(price_per_night) * Decimal::from(nights);
    to_f64(charge.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_is_price_times_nights() {
        assert_eq!(stay_charge(300.0, 2), 600.0);
        assert_eq!(stay_charge(199.99, 3), 599.97);
    }

    #[test]
    fn charge_rounds_half_up_to_cents() {
        // 33.335 * 3 = 100.005 -> 100.01
        assert_eq!(stay_charge(33.335, 3), 100.01);
    }

    #[test]
    fn non_finite_price_charges_nothing() {
        assert_eq!(stay_charge(f64::NAN, 2), 0.0);
    }
}
