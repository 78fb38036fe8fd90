//! Spreadsheet output
//!
//! Writes a single-sheet workbook with a bold header row and no index column.

use crate::output::traits::{PersistResult, RecordWriter, HEADERS};
use crate::state::Record;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Column widths for text, author and tags
const COLUMN_WIDTHS: [f64; 3] = [90.0, 24.0, 40.0];

/// Writes records to an `.xlsx` workbook
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWriter;

impl RecordWriter for XlsxWriter {
    fn write_records(&self, records: &[Record], destination: &Path) -> PersistResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Sheet1")?;

        for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
            worksheet.set_column_width(col, width)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet.write_string(row, 0, record.text.as_str())?;
            worksheet.write_string(row, 1, record.author.as_str())?;
            worksheet.write_string(row, 2, record.joined_tags())?;
        }

        workbook.save(destination)?;
        Ok(())
    }
}
