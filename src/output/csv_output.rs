//! CSV output

use crate::output::traits::{PersistResult, RecordWriter, HEADERS};
use crate::state::Record;
use std::path::Path;

/// Writes records to a comma-separated file with a header row
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvWriter;

impl RecordWriter for CsvWriter {
    fn write_records(&self, records: &[Record], destination: &Path) -> PersistResult<()> {
        let mut writer = csv::Writer::from_path(destination)?;
        writer.write_record(HEADERS)?;

        for record in records {
            let tags = record.joined_tags();
            writer.write_record([record.text.as_str(), record.author.as_str(), tags.as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }
}
