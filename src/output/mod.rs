//! Output module for persisting records and reporting on a run
//!
//! This module handles:
//! - Writing the aggregated records as a spreadsheet or CSV file
//! - Skipping the write entirely when nothing was collected
//! - Printing run statistics

mod csv_output;
pub mod stats;
mod traits;
mod xlsx;

pub use csv_output::CsvWriter;
pub use stats::{format_summary, print_summary};
pub use traits::{OutputFormat, PersistError, PersistResult, PersistStatus, RecordWriter, HEADERS};
pub use xlsx::XlsxWriter;

use crate::state::Record;
use std::path::Path;

/// Persists the aggregated records to `destination`
///
/// The format follows the destination's extension (`.xlsx` or `.csv`). An
/// existing file is overwritten. When `records` is empty nothing is written,
/// a warning is logged and `PersistStatus::Skipped` is returned.
///
/// # Example
///
/// ```no_run
/// use quote_ripple::output::persist;
/// use quote_ripple::state::Record;
/// use std::path::Path;
///
/// let records = vec![Record::new("T", "A", vec!["x".to_string(), "y".to_string()])];
/// persist(&records, Path::new("citas.xlsx")).unwrap();
/// ```
pub fn persist(records: &[Record], destination: &Path) -> PersistResult<PersistStatus> {
    if records.is_empty() {
        tracing::warn!(
            "No quotes collected, not writing {}",
            destination.display()
        );
        return Ok(PersistStatus::Skipped);
    }

    let format = OutputFormat::from_path(destination)
        .ok_or_else(|| PersistError::UnsupportedFormat(destination.display().to_string()))?;

    let writer: Box<dyn RecordWriter> = match format {
        OutputFormat::Xlsx => Box::new(XlsxWriter),
        OutputFormat::Csv => Box::new(CsvWriter),
    };
    writer.write_records(records, destination)?;

    tracing::info!(
        "Saved {} quotes to {}",
        records.len(),
        destination.display()
    );

    Ok(PersistStatus::Written {
        rows: records.len(),
        path: destination.to_path_buf(),
    })
}
