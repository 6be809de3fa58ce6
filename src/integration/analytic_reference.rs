/// Exact value of a definite integral from a known antiderivative: F(b) - F(a).
pub fn definite_integral_from_antiderivative<T>(antiderivative: T, a: f64, b: f64) -> f64
where
    T: Fn(f64) -> f64,
{
    antiderivative(b) - antiderivative(a)
}

/// Exact integral of x^2 over [a,b], (b^3 - a^3)/3. Ground truth for the convergence sweep.
pub fn analytic_reference(a: f64, b: f64) -> f64 {
    definite_integral_from_antiderivative(|x| x.powi(3) / 3.0, a, b)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_analytic_reference_unit_interval() {
        assert_eq!(analytic_reference(0.0, 1.0), 1.0 / 3.0);
    }

    #[test]
    fn test_analytic_reference_general_interval() {
        assert_relative_eq!(analytic_reference(-1.0, 2.0), 3.0, epsilon = 1E-14);
        assert_relative_eq!(analytic_reference(1.0, 3.0), 26.0 / 3.0, epsilon = 1E-14);
    }

    #[test]
    fn test_user_supplied_antiderivative() {
        let result = definite_integral_from_antiderivative(|x| -x.cos(), 0.0, std::f64::consts::PI);
        assert_relative_eq!(result, 2.0, epsilon = 1E-14);
    }
}
