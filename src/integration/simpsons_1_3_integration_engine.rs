use log::{debug, warn};
use ndarray::s;

use crate::{
    integration::{
        can_integrate::CanIntegrate1D, sample_grid::SampledDomain,
        trapezoidal_integration_engine::trapezoid_sum,
    },
    prelude::{QuadResult, QuadratureError},
};

/// How each pair of sub-intervals is turned into an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimpsonStrategy {
    /// The closed form (h/3)(f0 + 4f1 + f2). Stable for any finite samples.
    #[default]
    Coefficient,
    /// Fit the vertex-form parabola a(x-xv)^2 + yv through the three samples and integrate it
    /// exactly.
    /// Rejects flat or collinear samples with a numerical instability error.
    VertexParabola,
}

// An struct the integrates a 1D real function f(x) using the composite Simpson's 1/3 rule
// Samples are consumed in overlapping triples; an odd interval left over at the end is closed
// with a trapezoid
#[derive(Debug, Clone)]
pub struct Simpson13Engine {
    domain: SampledDomain,
    strategy: SimpsonStrategy,
}

impl Simpson13Engine {
    // Construct from bounds and number of points
    // The boolean flag is if you want to cache the x domain points to save speed on repeated calls (true) or recompute the x points each time (false)
    pub fn new(
        number_of_points: usize,
        lower_bound: f64,
        upper_bound: f64,
        cache_x_points: bool,
    ) -> Self {
        Simpson13Engine {
            domain: SampledDomain::new(number_of_points, lower_bound, upper_bound, cache_x_points),
            strategy: SimpsonStrategy::default(),
        }
    }
    // Selects how each parabola segment is integrated
    pub fn with_strategy(mut self, strategy: SimpsonStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

// Area under the parabola through three equally spaced samples
fn coefficient_area(y1: f64, y2: f64, y3: f64, dx: f64) -> f64 {
    dx / 3.0 * (y1 + 4.0 * y2 + y3)
}

// Area under the vertex-form parabola through (x1,y1), (x2,y2), (x3,y3) over [x1,x3]
fn vertex_parabola_area(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
) -> QuadResult<f64> {
    let unstable = |reason: &'static str| QuadratureError::NumericalInstability { x: x1, reason };

    let dy23 = y2 - y3;
    if dy23.abs() <= f64::EPSILON * y2.abs().max(y3.abs()) {
        return Err(unstable("the last two samples of the triple coincide"));
    }
    let ratio = (y1 - y2) / dy23;

    // Equating a(x-xv)^2 + yv at both pairs of samples gives a linear equation in xv
    let numerator = x1 * x1 - x2 * x2 - ratio * (x2 * x2 - x3 * x3);
    let denominator = 2.0 * ((x1 - x2) - ratio * (x2 - x3));
    let scale = 2.0 * ((x1 - x2).abs() + (ratio * (x2 - x3)).abs());
    if denominator.abs() <= 4.0 * f64::EPSILON * scale {
        return Err(unstable("the samples are collinear, the parabola has no vertex"));
    }
    let x_vertex = numerator / denominator;

    // (xi-xv)^2 - (xj-xv)^2 factored, using whichever pair is further from the vertex's axis
    let d12 = (x1 - x2) * (x1 + x2 - 2.0 * x_vertex);
    let d23 = (x2 - x3) * (x2 + x3 - 2.0 * x_vertex);
    let curvature = if d12.abs() >= d23.abs() {
        (y1 - y2) / d12
    } else {
        dy23 / d23
    };
    let y_vertex = y1 - curvature * (x1 - x_vertex).powi(2);
    if !x_vertex.is_finite() || !curvature.is_finite() || !y_vertex.is_finite() {
        return Err(unstable("the vertex-form parabola is not finite"));
    }

    // F(x) = a/3 (x-xv)^3 + yv x, so F'(x) = a(x-xv)^2 + yv
    let antiderivative = |x: f64| curvature / 3.0 * (x - x_vertex).powi(3) + y_vertex * x;
    Ok(antiderivative(x3) - antiderivative(x1))
}

impl CanIntegrate1D for Simpson13Engine {
    fn integrate<F>(&self, f: F) -> QuadResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        let number_of_points = self.domain.number_of_points();
        if number_of_points < 3 {
            return Err(QuadratureError::Domain(format!(
                "Simpson's rule needs at least 3 points, got {number_of_points}"
            )));
        }
        let area = self.domain.with_points(|x_points, dx| {
            let y_points = x_points.mapv(|x| f(x));
            let n = x_points.len();
            // 1 when an interval is left over after pairing them up
            let remainder = (n - 3) % 2;
            let mut area = 0.0;
            for i in 0..(n - remainder - 1) / 2 {
                let j = 2 * i;
                area += match self.strategy {
                    SimpsonStrategy::Coefficient => {
                        coefficient_area(y_points[j], y_points[j + 1], y_points[j + 2], dx)
                    }
                    SimpsonStrategy::VertexParabola => vertex_parabola_area(
                        x_points[j],
                        y_points[j],
                        x_points[j + 1],
                        y_points[j + 1],
                        x_points[j + 2],
                        y_points[j + 2],
                    )
                    .inspect_err(|e| warn!("simpson triple {i} rejected: {e}"))?,
                };
            }
            if remainder == 1 {
                area += trapezoid_sum(y_points.slice(s![n - 2..]), dx);
            }
            Ok(area)
        })?;
        debug!(
            "simpson ({:?}) with {number_of_points} points: {area}",
            self.strategy
        );
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

/// Composite Simpson's rule of f over [a,b] sampled at n points (n >= 3), closed-form coefficients.
pub fn simpson<F>(f: F, a: f64, b: f64, n: usize) -> QuadResult<f64>
where
    F: Fn(f64) -> f64,
{
    simpson_with_strategy(f, a, b, n, SimpsonStrategy::Coefficient)
}

/// Composite Simpson's rule with an explicit choice of per-segment strategy.
pub fn simpson_with_strategy<F>(
    f: F,
    a: f64,
    b: f64,
    n: usize,
    strategy: SimpsonStrategy,
) -> QuadResult<f64>
where
    F: Fn(f64) -> f64,
{
    Simpson13Engine::new(n, a, b, false)
        .with_strategy(strategy)
        .integrate(f)
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    const STRATEGIES: [SimpsonStrategy; 2] =
        [SimpsonStrategy::Coefficient, SimpsonStrategy::VertexParabola];

    #[test]
    fn test_simpsons_integration() {
        let error_limit = 1E-9;
        let upper_bound = PI / 2.0;
        let lower_bound = 0.0;
        let number_of_points = 10001;
        let dut = Simpson13Engine::new(number_of_points, lower_bound, upper_bound, false);
        let result = dut.integrate(|x| x.sin()).unwrap();
        let error = 1.0 - result;
        dbg!(&error);
        assert!(error.abs() < error_limit);

        let lower_bound = -PI / 2.0;
        let dut = Simpson13Engine::new(number_of_points, lower_bound, upper_bound, true);
        let result = dut.integrate(|x| x.sin()).unwrap();
        dbg!(&result);
        assert!(result.abs() < error_limit);
    }

    #[test]
    fn test_simpson_is_exact_for_quadratics() {
        for strategy in STRATEGIES {
            for n in (3..=201).step_by(2) {
                let result = simpson_with_strategy(|x| x * x, 0.0, 1.0, n, strategy).unwrap();
                assert_relative_eq!(result, 1.0 / 3.0, max_relative = 1E-10);
            }
            // Increasing on [1,4], no two samples coincide
            let f = |x: f64| 2.0 * x * x - 3.0 * x + 5.0;
            let result = simpson_with_strategy(f, 1.0, 4.0, 7, strategy).unwrap();
            // 2(64-1)/3 - 3(16-1)/2 + 15
            assert_relative_eq!(result, 34.5, max_relative = 1E-10);
        }
    }

    #[test]
    fn test_simpson_quadratic_with_repeated_samples() {
        // On [-1,2] with 7 points the triple (0, 0.5, 1) samples 5, 4, 4
        let f = |x: f64| 2.0 * x * x - 3.0 * x + 5.0;
        let result = simpson(f, -1.0, 2.0, 7).unwrap();
        // 2(8+1)/3 - 3(4-1)/2 + 15
        assert_relative_eq!(result, 16.5, max_relative = 1E-12);

        let vertex = simpson_with_strategy(f, -1.0, 2.0, 7, SimpsonStrategy::VertexParabola);
        assert!(matches!(vertex, Err(QuadratureError::NumericalInstability { x, .. }) if x == 0.0));
    }

    #[test]
    fn test_simpson_trailing_interval_residual() {
        // n = 4: one exact parabola over [0, 2/3] and a trapezoid over [2/3, 1]
        // The trapezoid over-estimates x^2 by h^3/6
        let h: f64 = 1.0 / 3.0;
        for strategy in STRATEGIES {
            let result = simpson_with_strategy(|x| x * x, 0.0, 1.0, 4, strategy).unwrap();
            let residual = result - 1.0 / 3.0;
            dbg!(&residual);
            assert_relative_eq!(residual, h.powi(3) / 6.0, max_relative = 1E-10);
        }
    }

    #[test]
    fn test_simpson_vertex_matches_coefficients() {
        let f = |x: f64| (0.3 * x).exp() + 2.0 * x;
        for n in [3, 4, 9, 50, 101] {
            let closed = simpson(f, 0.5, 3.0, n).unwrap();
            let vertex =
                simpson_with_strategy(f, 0.5, 3.0, n, SimpsonStrategy::VertexParabola).unwrap();
            assert_relative_eq!(closed, vertex, max_relative = 1E-9);
        }
    }

    #[test]
    fn test_simpson_needs_three_points() {
        for strategy in STRATEGIES {
            let result = simpson_with_strategy(|x| x * x, 0.0, 1.0, 2, strategy);
            assert!(matches!(result, Err(QuadratureError::Domain(_))));
        }
        assert!(matches!(simpson(|x| x, 0.0, 1.0, 0), Err(QuadratureError::Domain(_))));
    }

    #[test]
    fn test_vertex_parabola_rejects_flat_and_linear_samples() {
        let flat = simpson_with_strategy(|_| 2.0, 0.0, 1.0, 5, SimpsonStrategy::VertexParabola);
        assert!(matches!(flat, Err(QuadratureError::NumericalInstability { x, .. }) if x == 0.0));

        let linear =
            simpson_with_strategy(|x| 4.0 * x + 1.0, 0.0, 1.0, 3, SimpsonStrategy::VertexParabola);
        assert!(matches!(linear, Err(QuadratureError::NumericalInstability { .. })));

        // The coefficient form has no such restriction
        assert_relative_eq!(simpson(|_| 2.0, 0.0, 1.0, 5).unwrap(), 2.0, epsilon = 1E-12);
        assert_relative_eq!(simpson(|x| 4.0 * x + 1.0, 0.0, 1.0, 3).unwrap(), 3.0, epsilon = 1E-12);
    }

    #[test]
    fn test_vertex_parabola_flat_pair_in_front() {
        // y1 == y2 but y2 != y3 still defines a parabola, vertex halfway between x1 and x2
        let area = vertex_parabola_area(-1.0, 1.0, 1.0, 1.0, 3.0, 9.0).unwrap();
        // x^2 over [-1, 3]
        assert_relative_eq!(area, 28.0 / 3.0, max_relative = 1E-12);
    }

    #[test]
    fn test_simpson_propagates_nan() {
        let result = simpson(|x| if x > 0.5 { f64::NAN } else { x }, 0.0, 1.0, 5).unwrap();
        assert!(result.is_nan());
    }
}
