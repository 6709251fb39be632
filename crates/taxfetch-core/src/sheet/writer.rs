//! Output spreadsheet writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use tracing::info;

use super::{output_file_name, RecordSink, Result};
use crate::error::SheetError;
use crate::models::{County, OutputRecord, SheetFormat, OUTPUT_SCHEMA};

const HEADER_FILL: u32 = 0xDDEBF7;

/// Writes output records to a timestamped file under an output directory.
#[derive(Debug, Clone)]
pub struct SpreadsheetSink {
    directory: PathBuf,
    county: County,
    format: SheetFormat,
}

impl SpreadsheetSink {
    pub fn new(directory: impl Into<PathBuf>, county: County, format: SheetFormat) -> Self {
        Self {
            directory: directory.into(),
            county,
            format,
        }
    }

    /// Path the sink writes to for a run finishing at `timestamp`.
    pub fn output_path(&self, timestamp: DateTime<Local>) -> PathBuf {
        self.directory
            .join(output_file_name(self.county, self.format, timestamp))
    }

    /// Write `records` as if the run finished at `timestamp`.
    pub fn write_at(
        &self,
        records: &[OutputRecord],
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory).map_err(|source| SheetError::CreateDir {
            path: self.directory.display().to_string(),
            source,
        })?;

        let path = self.output_path(timestamp);
        match self.format {
            SheetFormat::Xlsx => write_xlsx(&path, records)?,
            SheetFormat::Csv => write_csv(&path, records)?,
        }

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

impl RecordSink for SpreadsheetSink {
    fn write(&self, records: Vec<OutputRecord>) -> Result<PathBuf> {
        self.write_at(&records, Local::now())
    }
}

/// Write a workbook with a styled header row followed by one row per record.
pub fn write_xlsx(path: &Path, records: &[OutputRecord]) -> Result<()> {
    build_workbook(path, records).map_err(|e| SheetError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn build_workbook(path: &Path, records: &[OutputRecord]) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);

    // Left with the default "Sheet1" name.
    let worksheet = workbook.add_worksheet();

    for (col, name) in OUTPUT_SCHEMA.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.values().iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, value)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    workbook.save(path)
}

/// Write a CSV file with the schema header row.
pub fn write_csv(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(OUTPUT_SCHEMA)?;
    for record in records {
        writer.write_record(record.values())?;
    }

    writer.flush().map_err(|e| SheetError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
