use crate::prelude::QuadResult;

// A trait that define a 1D integration routine over a fixed grid of samples
// The integrand must be pure: the same x always gives the same f(x) and evaluating it has
// no side effects. Rules may evaluate a grid point more than once and the sweep may run
// rules in parallel, both rely on this.
pub trait CanIntegrate1D {
    // Sets the lower bound of the x domain
    fn set_lower_bound(&mut self, x: f64);
    // Sets the upper bound of the x domain
    fn set_upper_bound(&mut self, x: f64);
    // Sets the number of samples taken over the x domain
    fn set_number_of_points(&mut self, n: usize);
    // Integrates f(x)dx
    fn integrate<F>(&self, f: F) -> QuadResult<f64>
    where
        F: Fn(f64) -> f64;
}
