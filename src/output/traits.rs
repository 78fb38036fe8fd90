//! Record writer trait and persistence types
//!
//! This module defines the interface every tabular output format implements,
//! together with the fixed column layout shared by all of them.

use crate::state::Record;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column headers, in output order: quote text, author, tags
pub const HEADERS: [&str; 3] = ["Cita", "Autor", "Etiquetas"];

/// Errors that can occur while persisting records
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// What `persist` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    /// The destination was (over)written
    Written { rows: usize, path: PathBuf },

    /// Nothing was collected, so no file was written
    Skipped,
}

/// Tabular output formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// Picks the format matching the path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("xlsx") {
            Some(Self::Xlsx)
        } else if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Trait for record writers
///
/// A writer renders one header row followed by one row per record and fully
/// overwrites the destination.
pub trait RecordWriter {
    /// Writes all records to `destination`
    ///
    /// # Arguments
    ///
    /// * `records` - The records, in output order
    /// * `destination` - File to create or truncate
    fn write_records(&self, records: &[Record], destination: &Path) -> PersistResult<()>;
}
