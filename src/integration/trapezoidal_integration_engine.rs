use log::debug;

use crate::{
    integration::{can_integrate::CanIntegrate1D, sample_grid::SampledDomain},
    prelude::{QuadResult, VR1D},
};

// An struct the integrates a 1D real function f(x) using the composite trapezoidal rule
// Error falls off as O(h^2)
#[derive(Debug, Clone)]
pub struct TrapezoidalIntegrationEngine {
    domain: SampledDomain,
}

impl TrapezoidalIntegrationEngine {
    // Construct from bounds and number of points
    // The boolean flag is if you want to cache the x domain points to save speed on repeated calls (true) or recompute the x points each time (false)
    pub fn new(
        number_of_points: usize,
        lower_bound: f64,
        upper_bound: f64,
        cache_x_points: bool,
    ) -> Self {
        TrapezoidalIntegrationEngine {
            domain: SampledDomain::new(number_of_points, lower_bound, upper_bound, cache_x_points),
        }
    }
}

// Sum of 0.5*(y[i]+y[i+1])*dx over consecutive samples
pub(crate) fn trapezoid_sum(y_points: VR1D, dx: f64) -> f64 {
    y_points
        .windows(2)
        .into_iter()
        .map(|pair| 0.5 * (pair[0] + pair[1]) * dx)
        .sum()
}

impl CanIntegrate1D for TrapezoidalIntegrationEngine {
    fn integrate<F>(&self, f: F) -> QuadResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        let area = self.domain.with_points(|x_points, dx| {
            let y_points = x_points.mapv(|x| f(x));
            Ok(trapezoid_sum(y_points.view(), dx))
        })?;
        debug!("trapezoidal with {} points: {area}", self.domain.number_of_points());
        Ok(area)
    }

    // Dynamically sets the lower bound.  Will update cache if configured.
    fn set_lower_bound(&mut self, x: f64) {
        self.domain.set_lower_bound(x);
    }
    // Dynamically sets the upper bound.  Will update cache if configured.
    fn set_upper_bound(&mut self, x: f64) {
        self.domain.set_upper_bound(x);
    }
    // Dynamically sets the number of points.  Will update cache if configured.
    fn set_number_of_points(&mut self, n: usize) {
        self.domain.set_number_of_points(n);
    }
}

/// Composite trapezoidal rule of f over [a,b] sampled at n points (n >= 2).
pub fn trapezoidal<F>(f: F, a: f64, b: f64, n: usize) -> QuadResult<f64>
where
    F: Fn(f64) -> f64,
{
    TrapezoidalIntegrationEngine::new(n, a, b, false).integrate(f)
}
