//! Data models for input rows, output rows and configuration.

pub mod config;
pub mod record;
pub mod schema;

pub use config::{BatchConfig, County, FetchConfig, OutputConfig, SheetFormat, TaxFetchConfig};
pub use record::{FetchStatus, InputRecord, OutputRecord};
pub use schema::{OUTPUT_SCHEMA, SCHEMA_LEN};
