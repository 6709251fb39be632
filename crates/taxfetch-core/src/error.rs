//! Error types for the taxfetch-core library.

use thiserror::Error;

/// Main error type for the taxfetch library.
#[derive(Error, Debug)]
pub enum TaxFetchError {
    /// Remote lookup failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Spreadsheet loading or writing failed.
    #[error("spreadsheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The selected county has no lookup implementation.
    #[error("Currently only Bexar County is supported (got {0}).")]
    UnsupportedCounty(String),
}

/// Errors raised while retrieving a tax-detail page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// Connect or read timeout elapsed.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status} for URL: {url}")]
    Status { status: u16, url: String },

    /// The response body could not be read.
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Errors related to spreadsheet input and output.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Failed to open the workbook.
    #[error("failed to open {path}: {reason}")]
    Open { path: String, reason: String },

    /// The workbook has no worksheet.
    #[error("no worksheet found in {0}")]
    NoWorksheet(String),

    /// The first row is missing or empty.
    #[error("no header row found in {0}")]
    MissingHeader(String),

    /// A worksheet could not be read.
    #[error("failed to read worksheet: {0}")]
    Read(String),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The output workbook could not be written.
    #[error("failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    /// The output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to field extraction from a tax-detail page.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A matched cell is not inside an element container.
    #[error("no container element for {0}")]
    NoContainer(String),

    /// A value cell has no preceding label cell.
    #[error("no label cell before value: {0}")]
    MissingLabel(String),
}

/// Result type for the taxfetch library.
pub type Result<T> = std::result::Result<T, TaxFetchError>;
