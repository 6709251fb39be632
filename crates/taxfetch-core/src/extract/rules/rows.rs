//! Labeled row extraction (owner, property, payment).

use scraper::{ElementRef, Html};

use super::patterns::TABLE_CELL;
use super::{contains_any, element_text, FieldExtractor, FieldResult};
use crate::error::ExtractionError;

/// Finds the first cell mentioning one of `keys` and returns its row's text.
pub struct RowExtractor {
    field: &'static str,
    keys: &'static [&'static str],
}

impl RowExtractor {
    pub fn new(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self { field, keys }
    }

    /// Owner name and mailing address row.
    pub fn owner() -> Self {
        Self::new("owner", &["Owner Name", "Owner"])
    }

    /// Property (situs) address row.
    pub fn property() -> Self {
        Self::new("property", &["Property Address", "Property"])
    }

    /// Last payment row.
    pub fn payment() -> Self {
        Self::new("payment", &["Payment", "Last Payment"])
    }
}

impl FieldExtractor for RowExtractor {
    type Output = String;

    fn extract(&self, html: &Html) -> FieldResult<String> {
        let Some(cell) = html
            .select(&TABLE_CELL)
            .find(|cell| contains_any(&element_text(*cell), self.keys))
        else {
            return Ok(None);
        };

        let row = cell
            .parent()
            .and_then(ElementRef::wrap)
            .ok_or_else(|| ExtractionError::NoContainer(self.field.to_string()))?;

        Ok(Some(element_text(row)))
    }
}
