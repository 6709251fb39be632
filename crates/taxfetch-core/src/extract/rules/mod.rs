//! Rule-based field extractors for tax-detail pages.

pub mod address;
pub mod amounts;
pub mod patterns;
pub mod rows;
pub mod valuation;

pub use address::{extract_address, find_address, parse_address, AddressComponents};
pub use amounts::{normalize_tax_amount, TaxDueExtractor};
pub use rows::RowExtractor;
pub use valuation::{classify_label, Valuation, ValuationExtractor, ValueKind};

use scraper::{ElementRef, Html};

use crate::error::ExtractionError;

/// Outcome of one field extractor: found, nothing matched, or failed.
pub type FieldResult<T> = Result<Option<T>, ExtractionError>;

/// Trait for page field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a parsed page.
    fn extract(&self, html: &Html) -> FieldResult<Self::Output>;
}

/// Collapse whitespace runs to a single space and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, with block-level boundaries kept apart.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    append_text(element, &mut out);
    clean_text(&out)
}

fn append_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if matches!(name, "script" | "style") {
                continue;
            }
            let block = is_block(name);
            if block {
                out.push(' ');
            }
            append_text(child_element, out);
            if block {
                out.push(' ');
            }
        }
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address" | "article" | "blockquote" | "br" | "caption" | "dd" | "div" | "dl" | "dt"
            | "fieldset" | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hr" | "li"
            | "ol" | "p" | "pre" | "section" | "table" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" | "ul"
    )
}

/// Case-insensitive check for any of `tokens` in `text`.
pub fn contains_any(text: &str, tokens: &[&str]) -> bool {
    let lower = text.to_lowercase();
    tokens.iter().any(|token| lower.contains(&token.to_lowercase()))
}
