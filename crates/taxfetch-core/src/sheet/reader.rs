//! Input spreadsheet loading (xlsx/xls/ods via calamine, csv via the csv crate).

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use tracing::{debug, info};

use super::{RecordSource, Result};
use crate::error::SheetError;
use crate::models::InputRecord;

/// Reads input records from a workbook or CSV file, chosen by extension.
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
}

impl SpreadsheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_csv(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

impl RecordSource for SpreadsheetSource {
    fn load(&self) -> Result<Vec<InputRecord>> {
        info!("Loading input from {}", self.path.display());
        let records = if self.is_csv() {
            read_csv(&self.path)?
        } else {
            read_workbook(&self.path)?
        };
        info!("Loaded {} records", records.len());
        Ok(records)
    }
}

/// Read the first worksheet of a workbook.
///
/// Formula cells are reported as their formula text.
pub fn read_workbook(path: &Path) -> Result<Vec<InputRecord>> {
    let path_label = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
        path: path_label.clone(),
        reason: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SheetError::NoWorksheet(path_label.clone()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SheetError::Read(e.to_string()))?;

    // Not every format exposes formulas; plain values are used then.
    let formulas = workbook.worksheet_formula(&sheet_name).ok();
    debug!(
        "Reading sheet {:?} ({} rows) from {}",
        sheet_name,
        range.height(),
        path_label
    );

    let rows = sheet_rows(&range, formulas.as_ref());
    records_from_rows(rows, &path_label)
}

fn sheet_rows(range: &Range<Data>, formulas: Option<&Range<String>>) -> Vec<Vec<String>> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    range
        .rows()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    let position = (start_row + r as u32, start_col + c as u32);
                    formulas
                        .and_then(|f| f.get_value(position))
                        .filter(|formula| !formula.is_empty())
                        .cloned()
                        .unwrap_or_else(|| cell_text(cell))
                })
                .collect()
        })
        .collect()
}

/// Render a cell as text.
///
/// Non-date numbers are truncated to integers, dates use chrono's default
/// display, errors and empty cells become `""`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => (*f as i64).to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Read a CSV file with a header row.
pub fn read_csv(path: &Path) -> Result<Vec<InputRecord>> {
    let display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SheetError::Open {
            path: display.clone(),
            reason: e.to_string(),
        })?;

    let rows = reader
        .records()
        .map(|row| row.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

    records_from_rows(rows, &display)
}

/// Turn raw rows into records: the first row names the fields.
///
/// Rows whose cells are all blank are skipped.
pub fn records_from_rows(
    rows: impl IntoIterator<Item = Vec<String>>,
    source: &str,
) -> Result<Vec<InputRecord>> {
    let mut rows = rows.into_iter();

    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|h| h.trim().to_string()).collect())
        .filter(|headers: &Vec<String>| headers.iter().any(|h| !h.is_empty()))
        .ok_or_else(|| SheetError::MissingHeader(source.to_string()))?;

    Ok(rows
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| InputRecord::from_row(&headers, &row))
        .collect())
}
