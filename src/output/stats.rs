//! Run statistics
//!
//! Renders the counters of a finished run for the terminal.

use crate::crawler::RunReport;
use crate::output::PersistStatus;

/// Formats a run report as a short plain-text summary
pub fn format_summary(report: &RunReport) -> String {
    let outcome = &report.outcome;
    let mut out = String::new();

    out.push_str("=== Run Summary ===\n\n");
    out.push_str(&format!("Strategy: {}\n", report.strategy));
    out.push_str(&format!("Final state: {}\n", outcome.final_state));
    out.push_str(&format!("Pages visited: {}\n", outcome.pages_visited));
    out.push_str(&format!("Pages failed: {}\n", outcome.pages_failed));
    out.push_str(&format!("Quotes collected: {}\n", outcome.records.len()));
    out.push_str(&format!("Malformed quotes skipped: {}\n", outcome.records_skipped));

    let output_line = match &report.persisted {
        Ok(PersistStatus::Written { rows, path }) => {
            format!("Output: {} rows written to {}", rows, path.display())
        }
        Ok(PersistStatus::Skipped) => {
            format!("Output: nothing collected, {} not written", report.destination)
        }
        Err(e) => format!("Output: failed to write {} ({})", report.destination, e),
    };
    out.push_str(&format!("{}\n", output_line));

    out
}

/// Prints a run report to stdout
pub fn print_summary(report: &RunReport) {
    print!("{}", format_summary(report));
}
