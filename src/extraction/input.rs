//! Numeric input parsing
//!
//! Form text is turned into finite numbers before it reaches the estimator.

use crate::error::{InputError, InputResult};
use crate::models::InputField;

/// Parse a number as typed into a form field
///
/// Accepts a decimal comma ("0,5") and scientific notation. Empty text, NaN
/// and infinities are rejected.
pub fn parse_number(field: InputField, raw: &str) -> InputResult<f64> {
    let normalized = raw.trim().replace(',', ".");

    let value: f64 = normalized.parse().map_err(|_| InputError::NotANumber {
        field: field.as_str(),
        raw: raw.to_string(),
    })?;

    ensure_finite(field, value)
}

pub fn ensure_finite(field: InputField, value: f64) -> InputResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field: field.as_str() })
    }
}
