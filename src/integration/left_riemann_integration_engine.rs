use log::debug;

use crate::{
    integration::{can_integrate::CanIntegrate1D, sample_grid::SampledDomain},
    prelude::QuadResult,
};

// An struct the integrates a 1D real function f(x) using a left-endpoint Riemann sum
// Note: every grid point contributes a rectangle f(x)*h, the final point b included.
// The textbook left rule stops one point short, so this sum sits h*f(b) above it.
// Converges as O(h) and is kept for comparison against the higher order rules.
#[derive(Debug, Clone)]
pub struct LeftRiemannEngine {
    domain: SampledDomain,
}

impl LeftRiemannEngine {
    // Construct from bounds and number of points
    // The boolean flag is if you want to cache the x domain points to save speed on repeated calls (true) or recompute the x points each time (false)
    pub fn new(
        number_of_points: usize,
        lower_bound: f64,
        upper_bound: f64,
        cache_x_points: bool,
    ) -> Self {
        LeftRiemannEngine {
            domain: SampledDomain::new(number_of_points, lower_bound, upper_bound, cache_x_points),
        }
    }
}

impl CanIntegrate1D for LeftRiemannEngine {
    fn integrate<F>(&self, f: F) -> QuadResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        let area = self
            .domain
            .with_points(|x_points, dx| Ok(x_points.iter().map(|&x| f(x)).sum::<f64>() * dx))?;
        debug!("left riemann with {} points: {area}", self.domain.number_of_points());
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

/// Left-endpoint Riemann sum of f over [a,b] sampled at n points (n >= 2), final point included.
pub fn left_riemann<F>(f: F, a: f64, b: f64, n: usize) -> QuadResult<f64>
where
    F: Fn(f64) -> f64,
{
    LeftRiemannEngine::new(n, a, b, false).integrate(f)
}
