//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly. Generic over the engine scalar so both
//! `f32` and `f64` instantiations validate identically.

use crate::error::EsscherError;
use crate::variate::Real;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive<F: Real>(value: F, name: &str) -> crate::error::Result<F> {
    if !value.is_finite() || value <= F::zero() {
        return Err(EsscherError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite (rejects NaN, Inf, negatives).
pub(crate) fn validate_non_negative<F: Real>(value: F, name: &str) -> crate::error::Result<F> {
    if !value.is_finite() || value < F::zero() {
        return Err(EsscherError::InvalidInput {
            message: format!("{name} must be non-negative and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite<F: Real>(value: F, name: &str) -> crate::error::Result<F> {
    if !value.is_finite() {
        return Err(EsscherError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}
