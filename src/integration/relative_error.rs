use crate::prelude::{QuadResult, QuadratureError};

/// |true - estimate| / |true|.
/// A zero reference has no relative scale and is rejected rather than returning inf or NaN.
/// Non-finite inputs are not screened and propagate into the result.
pub fn relative_error(true_value: f64, estimate: f64) -> QuadResult<f64> {
    if true_value == 0.0 {
        return Err(QuadratureError::UndefinedMetric);
    }
    Ok(((true_value - estimate) / true_value).abs())
}
