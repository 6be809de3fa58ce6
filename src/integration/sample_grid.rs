use log::debug;
use ndarray::Array1;

use crate::prelude::{QuadResult, QuadratureError, R1D, VR1D};

// Checks that [a,b] is a usable interval: both ends finite and a < b
pub fn validate_interval(a: f64, b: f64) -> QuadResult<()> {
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadratureError::Domain(format!(
            "interval bounds must be finite, got [{a}, {b}]"
        )));
    }
    if a >= b {
        return Err(QuadratureError::Domain(format!(
            "lower bound must be below upper bound, got [{a}, {b}]"
        )));
    }
    Ok(())
}

// Helper for computing n equally spaced points spanning [a,b] inclusive
// Returns the points together with their spacing h = (b-a)/(n-1)
pub fn sample_grid(a: f64, b: f64, n: usize) -> QuadResult<(R1D, f64)> {
    if n < 2 {
        return Err(QuadratureError::Domain(format!(
            "a sample grid needs at least 2 points, got {n}"
        )));
    }
    validate_interval(a, b)?;
    let h = (b - a) / ((n - 1) as f64);
    let mut x_points = Array1::linspace(a, b, n);
    // a + (n-1)*h can round past b, the last sample must be exactly b
    x_points[n - 1] = b;
    debug!("sample grid over [{a}, {b}] with {n} points, h = {h:e}");
    Ok((x_points, h))
}

// The x domain shared by the fixed-grid engines: bounds, sample count and an optional cached grid
#[derive(Debug, Clone)]
pub struct SampledDomain {
    number_of_points: usize, // The number of points to sample
    lower_bound: f64, // The lower bound of x
    upper_bound: f64, // The upper bound of x
    cache_x_points: bool, // Keep the grid between calls
    cache: Option<(R1D, f64)>, // Cached x domain samples and spacing
}

impl SampledDomain {
    // The boolean flag is if you want to cache the x domain points to save speed on repeated calls (true) or recompute the x points each time (false)
    pub fn new(
        number_of_points: usize,
        lower_bound: f64,
        upper_bound: f64,
        cache_x_points: bool,
    ) -> Self {
        let mut domain = SampledDomain {
            number_of_points,
            lower_bound,
            upper_bound,
            cache_x_points,
            cache: None,
        };
        domain.refresh_cache();
        domain
    }

    pub fn number_of_points(&self) -> usize {
        self.number_of_points
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    pub fn set_number_of_points(&mut self, n: usize) {
        self.number_of_points = n;
        self.refresh_cache();
    }

    pub fn set_lower_bound(&mut self, x: f64) {
        self.lower_bound = x;
        self.refresh_cache();
    }

    pub fn set_upper_bound(&mut self, x: f64) {
        self.upper_bound = x;
        self.refresh_cache();
    }

    // An invalid configuration leaves the cache empty so the error surfaces on the next integration
    fn refresh_cache(&mut self) {
        self.cache = if self.cache_x_points {
            sample_grid(self.lower_bound, self.upper_bound, self.number_of_points).ok()
        } else {
            None
        };
    }

    // Runs op over the cached grid, or over a freshly built one
    pub fn with_points<T, Op>(&self, op: Op) -> QuadResult<T>
    where
        Op: FnOnce(VR1D, f64) -> QuadResult<T>,
    {
        match &self.cache {
            Some((x_points, h)) => op(x_points.view(), *h),
            None => {
                let (x_points, h) =
                    sample_grid(self.lower_bound, self.upper_bound, self.number_of_points)?;
                op(x_points.view(), h)
            }
        }
    }
}
