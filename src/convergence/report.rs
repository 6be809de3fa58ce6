use std::{fmt::Write as _, io};

use crate::convergence::convergence_sweep::ConvergenceRecord;

pub const CSV_HEADER: &str = "step_size,point_count,rule,estimate,relative_error";

// Writes sweep records as CSV, one row per record, reals at full precision
// This is the hand-off format for the log-log error plot
pub fn write_csv<W: io::Write>(records: &[ConvergenceRecord], mut writer: W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for record in records {
        writeln!(
            writer,
            "{:.17e},{},{},{:.17e},{:.17e}",
            record.step_size,
            record.point_count,
            record.rule.short_name(),
            record.estimate,
            record.relative_error
        )?;
    }
    Ok(())
}

// Renders sweep records as an aligned plain-text table
pub fn format_table(records: &[ConvergenceRecord]) -> String {
    let mut table = String::new();
    writeln!(
        table,
        "{:>12} {:>10} {:<22} {:>24} {:>14}",
        "step size", "points", "method", "estimate", "relative error"
    )
    .expect("write line");
    for record in records {
        writeln!(
            table,
            "{:>12.1e} {:>10} {:<22} {:>24.17} {:>14.6e}",
            record.step_size,
            record.point_count,
            record.rule.to_string(),
            record.estimate,
            record.relative_error
        )
        .expect("write line");
    }
    table
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::convergence::convergence_sweep::QuadratureRule;

    fn sample_records() -> Vec<ConvergenceRecord> {
        vec![
            ConvergenceRecord {
                step_size: 0.1,
                point_count: 10,
                rule: QuadratureRule::Trapezoidal,
                estimate: 0.335,
                relative_error: 0.005,
            },
            ConvergenceRecord {
                step_size: 0.1,
                point_count: 10,
                rule: QuadratureRule::Simpson,
                estimate: 1.0 / 3.0,
                relative_error: 0.0,
            },
        ]
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_csv(&sample_records(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].parse::<f64>().unwrap(), 0.1);
        assert_eq!(fields[1], "10");
        assert_eq!(fields[2], "trapezoidal");
        assert_eq!(fields[3].parse::<f64>().unwrap(), 0.335);
        let fields: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(fields[2], "simpson");
        assert_eq!(fields[3].parse::<f64>().unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn test_format_table() {
        let table = format_table(&sample_records());
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().next().unwrap().contains("relative error"));
        assert!(table.contains("Trapezoidal Method"));
        assert!(table.contains("Simpson's Rule"));
    }
}
