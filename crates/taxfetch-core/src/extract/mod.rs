//! Field extraction from tax-detail pages.

mod extractor;
pub mod rules;

pub use extractor::{ExtractedFields, TaxDetailExtractor, SENTINEL};
pub use rules::{
    extract_address, find_address, parse_address, AddressComponents, FieldExtractor,
    FieldResult, Valuation,
};
