//! Core library for enriching property-tax spreadsheets with county lookup data.
//!
//! This crate provides:
//! - Input loading from xlsx/xls/ods workbooks and CSV files
//! - Account number resolution from raw `TAXID` values
//! - Tax-detail page retrieval over HTTP
//! - Rule-based extraction of owner, property, tax due, payment and valuation fields
//! - Output assembly against a fixed 69-column schema and xlsx/CSV writing
//! - A sequential batch runner with progress events and cancellation

pub mod account;
pub mod assemble;
pub mod batch;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod sheet;

pub use account::{resolve, AccountResolver};
pub use assemble::RecordAssembler;
pub use batch::{BatchEvent, BatchRunner, BatchState, BatchSummary, CancelFlag, EventSink};
pub use error::{ExtractionError, FetchError, Result, SheetError, TaxFetchError};
pub use extract::{AddressComponents, ExtractedFields, TaxDetailExtractor, SENTINEL};
pub use fetch::{FetchedDocument, HttpTransport, TaxDetailFetcher, Transport};
pub use models::{
    County, FetchStatus, InputRecord, OutputRecord, SheetFormat, TaxFetchConfig, OUTPUT_SCHEMA,
};
pub use sheet::{RecordSink, RecordSource, SpreadsheetSink, SpreadsheetSource};
