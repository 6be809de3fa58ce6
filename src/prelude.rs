use ndarray::prelude::*;

pub type R1D = Array1<f64>;
pub type VR1D<'a> = ArrayView1<'a, f64>;

/// The errors raised by the quadrature rules, the error metric, and the convergence sweep.
/// Every error is raised at the point of detection and never recovered internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadratureError {
    /// Invalid point count, an empty or reversed interval, non-finite bounds or a bad step size
    #[error("domain error: {0}")]
    Domain(String),
    /// The vertex-form parabola through a sample triple could not be solved
    #[error("numerical instability in the triple starting at x = {x}: {reason}")]
    NumericalInstability { x: f64, reason: &'static str },
    /// Relative error requested against a zero reference value
    #[error("relative error is undefined for a zero reference value")]
    UndefinedMetric,
}

pub type QuadResult<T> = Result<T, QuadratureError>;
