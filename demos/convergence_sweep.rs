use std::{fs::File, io::BufWriter, path::PathBuf};

use lib_quadrature::{
    convergence::{
        convergence_sweep::{errors_by_rule, run_sweep, SweepConfiguration},
        report::{format_table, write_csv},
    },
    integration::{
        analytic_reference::analytic_reference, left_riemann_integration_engine::left_riemann,
    },
};
use log::info;

fn function_to_integrate(x: f64) -> f64 {
    x * x
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("IntegrationMethodErrors.csv"));

    let (a, b, n) = (0.0, 1.0, 10);
    let approximation = left_riemann(function_to_integrate, a, b, n).expect("left riemann sum");
    println!("Lefthand riemann approx to f, between {a} {b} steps= {n}");
    println!("{approximation}");

    let config = SweepConfiguration::default();
    let reference = analytic_reference(config.lower_bound(), config.upper_bound());
    let records = run_sweep(&config, function_to_integrate, reference).expect("convergence sweep");
    print!("{}", format_table(&records));

    for (rule, errors) in errors_by_rule(&records) {
        info!("{rule}: {errors:?}");
    }

    let file = File::create(&output).expect("create csv");
    write_csv(&records, BufWriter::new(file)).expect("write csv");
    info!("relative errors written to {}", output.display());
}
