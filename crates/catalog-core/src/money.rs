//! Conversion between decimal major-unit amounts and integer minor units.
//!
//! Prices are stored as minor units (cents). Transport layers speak in
//! major units with two-decimal precision and convert at the boundary.

use crate::error::DomainError;

/// Minor units per major unit.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest magnitude (in minor units) that survives an `f64` round trip.
const MAX_EXACT_MINOR_UNITS: f64 = 9_007_199_254_740_992.0;

/// Converts a major-unit amount to minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the amount is NaN, infinite, or too
/// large to be represented exactly.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn amount_to_minor_units(amount: f64) -> Result<i64, DomainError> {
    if !amount.is_finite() {
        return Err(DomainError::invalid_field("price", "price must be a finite number"));
    }
    let scaled = (amount * MINOR_UNITS_PER_MAJOR as f64).round();
    if scaled.abs() > MAX_EXACT_MINOR_UNITS {
        return Err(DomainError::invalid_field("price", "price is out of range"));
    }
    Ok(scaled as i64)
}

/// Converts minor units back to a major-unit amount.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn minor_units_to_amount(minor_units: i64) -> f64 {
    minor_units as f64 / MINOR_UNITS_PER_MAJOR as f64
}
