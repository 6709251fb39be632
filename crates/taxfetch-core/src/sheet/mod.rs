//! Spreadsheet input and output.

mod reader;
mod writer;

pub use reader::{cell_text, read_csv, read_workbook, records_from_rows, SpreadsheetSource};
pub use writer::{write_csv, write_xlsx, SpreadsheetSink};

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::SheetError;
use crate::models::{County, InputRecord, OutputRecord, SheetFormat};

/// Result type for spreadsheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Supplies the input records for a batch run.
pub trait RecordSource {
    /// Load every record, in input order.
    fn load(&self) -> Result<Vec<InputRecord>>;
}

/// Receives the finished output records of a batch run.
pub trait RecordSink {
    /// Persist `records` and return where they went.
    fn write(&self, records: Vec<OutputRecord>) -> Result<PathBuf>;
}

/// `<County>_Tax_Details_<yyyyMMdd_HHmmss>.<ext>`
pub fn output_file_name(county: County, format: SheetFormat, timestamp: DateTime<Local>) -> String {
    format!(
        "{}_Tax_Details_{}.{}",
        county.name(),
        timestamp.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
