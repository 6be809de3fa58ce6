pub mod prelude;
pub mod integration {
    pub mod sample_grid;
    pub mod can_integrate;
    pub mod left_riemann_integration_engine;
    pub mod trapezoidal_integration_engine;
    pub mod simpsons_1_3_integration_engine;
    pub mod analytic_reference;
    pub mod relative_error;
}
pub mod convergence {
    pub mod convergence_sweep;
    pub mod report;
}
