use std::{collections::BTreeMap, fmt};

use log::info;
use rayon::prelude::*;

use crate::{
    integration::{
        left_riemann_integration_engine::left_riemann,
        relative_error::relative_error,
        simpsons_1_3_integration_engine::{simpson_with_strategy, SimpsonStrategy},
        trapezoidal_integration_engine::trapezoidal,
    },
    prelude::{QuadResult, QuadratureError},
};

/// The quadrature rules compared by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuadratureRule {
    LeftRiemann,
    Trapezoidal,
    Simpson,
}

impl QuadratureRule {
    pub const ALL: [QuadratureRule; 3] = [
        QuadratureRule::LeftRiemann,
        QuadratureRule::Trapezoidal,
        QuadratureRule::Simpson,
    ];

    // Identifier used in CSV output
    pub fn short_name(&self) -> &'static str {
        match self {
            QuadratureRule::LeftRiemann => "left_riemann",
            QuadratureRule::Trapezoidal => "trapezoidal",
            QuadratureRule::Simpson => "simpson",
        }
    }

    // Smallest point count the rule accepts
    pub fn minimum_points(&self) -> usize {
        match self {
            QuadratureRule::Simpson => 3,
            _ => 2,
        }
    }

    pub fn integrate<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        n: usize,
        strategy: SimpsonStrategy,
    ) -> QuadResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            QuadratureRule::LeftRiemann => left_riemann(f, a, b, n),
            QuadratureRule::Trapezoidal => trapezoidal(f, a, b, n),
            QuadratureRule::Simpson => simpson_with_strategy(f, a, b, n, strategy),
        }
    }
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuadratureRule::LeftRiemann => "Lefthand Riemann Sum",
            QuadratureRule::Trapezoidal => "Trapezoidal Method",
            QuadratureRule::Simpson => "Simpson's Rule",
        };
        f.write_str(name)
    }
}

/// Settings for a convergence sweep.
/// The default compares all three rules on [0,1] at step sizes 1e-1 down to 1e-6.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfiguration {
    lower_bound: f64,
    upper_bound: f64,
    step_sizes: Vec<f64>,
    rules: Vec<QuadratureRule>,
    simpson_strategy: SimpsonStrategy,
    parallel: bool,
}

impl Default for SweepConfiguration {
    fn default() -> Self {
        SweepConfiguration {
            lower_bound: 0.0,
            upper_bound: 1.0,
            step_sizes: vec![0.1, 0.01, 0.001, 0.0001, 0.00001, 0.000001],
            rules: QuadratureRule::ALL.to_vec(),
            simpson_strategy: SimpsonStrategy::Coefficient,
            parallel: true,
        }
    }
}

impl SweepConfiguration {
    pub fn new(lower_bound: f64, upper_bound: f64, step_sizes: Vec<f64>) -> Self {
        SweepConfiguration {
            lower_bound,
            upper_bound,
            step_sizes,
            ..Default::default()
        }
    }
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }
    pub fn step_sizes(&self) -> &[f64] {
        &self.step_sizes
    }
    pub fn rules(&self) -> &[QuadratureRule] {
        &self.rules
    }
    pub fn set_rules(&mut self, rules: Vec<QuadratureRule>) {
        self.rules = rules;
    }
    pub fn set_simpson_strategy(&mut self, strategy: SimpsonStrategy) {
        self.simpson_strategy = strategy;
    }
    // Evaluate the step sizes concurrently.  The record order does not change.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    // Number of grid points used for a step size: the interval length over the step, truncated
    // The quotient is not rounded, 1/1e-5 lands just below 100000 and gives 99999 points
    pub fn point_count(&self, step_size: f64) -> QuadResult<usize> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(QuadratureError::Domain(format!(
                "step size must be positive and finite, got {step_size}"
            )));
        }
        let count = ((self.upper_bound - self.lower_bound) / step_size).trunc();
        if !count.is_finite() || count < 0.0 {
            return Err(QuadratureError::Domain(format!(
                "step size {step_size} does not fit [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }
        Ok(count as usize)
    }
}

/// One (step size, rule) cell of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRecord {
    pub step_size: f64,
    pub point_count: usize,
    pub rule: QuadratureRule,
    pub estimate: f64,
    pub relative_error: f64,
}

fn records_for_step<F>(
    config: &SweepConfiguration,
    f: &F,
    reference: f64,
    step_size: f64,
) -> QuadResult<Vec<ConvergenceRecord>>
where
    F: Fn(f64) -> f64,
{
    let point_count = config.point_count(step_size)?;
    config
        .rules
        .iter()
        .map(|&rule| {
            if point_count < rule.minimum_points() {
                return Err(QuadratureError::Domain(format!(
                    "step size {step_size} gives {point_count} points, {rule} needs {}",
                    rule.minimum_points()
                )));
            }
            let estimate = rule.integrate(
                f,
                config.lower_bound,
                config.upper_bound,
                point_count,
                config.simpson_strategy,
            )?;
            Ok(ConvergenceRecord {
                step_size,
                point_count,
                rule,
                estimate,
                relative_error: relative_error(reference, estimate)?,
            })
        })
        .collect()
}

/// Runs every configured rule at every configured step size against a known reference value.
/// Records are ordered by step size, then by rule, in configuration order.
/// The integrand must be pure; with parallel evaluation it is called from several threads.
pub fn run_sweep<F>(
    config: &SweepConfiguration,
    f: F,
    reference: f64,
) -> QuadResult<Vec<ConvergenceRecord>>
where
    F: Fn(f64) -> f64 + Sync,
{
    if reference == 0.0 {
        return Err(QuadratureError::UndefinedMetric);
    }
    info!(
        "sweeping {} step sizes x {} rules over [{}, {}]",
        config.step_sizes.len(),
        config.rules.len(),
        config.lower_bound,
        config.upper_bound
    );
    let per_step: Vec<Vec<ConvergenceRecord>> = if config.parallel {
        config
            .step_sizes
            .par_iter()
            .map(|&step_size| records_for_step(config, &f, reference, step_size))
            .collect::<QuadResult<_>>()?
    } else {
        config
            .step_sizes
            .iter()
            .map(|&step_size| records_for_step(config, &f, reference, step_size))
            .collect::<QuadResult<_>>()?
    };
    let records: Vec<ConvergenceRecord> = per_step.into_iter().flatten().collect();
    info!("sweep finished with {} records", records.len());
    Ok(records)
}

/// Relative errors per rule, each aligned with the sweep's step-size sequence.
pub fn errors_by_rule(records: &[ConvergenceRecord]) -> BTreeMap<QuadratureRule, Vec<f64>> {
    let mut errors: BTreeMap<QuadratureRule, Vec<f64>> = BTreeMap::new();
    for record in records {
        errors.entry(record.rule).or_default().push(record.relative_error);
    }
    errors
}
