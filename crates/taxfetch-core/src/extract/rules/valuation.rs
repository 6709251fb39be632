//! Appraised value breakdown (land / improvement / total).

use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::trace;

use super::patterns::{CURRENCY_VALUE, TABLE_CELL};
use super::{clean_text, contains_any, element_text, FieldExtractor, FieldResult};
use crate::error::ExtractionError;

/// Which valuation bucket a label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Land,
    Improvement,
    Total,
}

/// Valuation figures, each `$` followed by digits only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Valuation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

impl Valuation {
    pub fn is_empty(&self) -> bool {
        self.land.is_none() && self.improvement.is_none() && self.total.is_none()
    }

    fn set(&mut self, kind: ValueKind, amount: String) {
        let slot = match kind {
            ValueKind::Land => &mut self.land,
            ValueKind::Improvement => &mut self.improvement,
            ValueKind::Total => &mut self.total,
        };
        *slot = Some(amount);
    }
}

/// Classify a value label by case-insensitive substring.
pub fn classify_label(label: &str) -> Option<ValueKind> {
    let label = label.to_lowercase();
    if label.contains("land") {
        Some(ValueKind::Land)
    } else if label.contains("improvement") || label.contains("improved") {
        Some(ValueKind::Improvement)
    } else if label.contains("total") || label.contains("market") {
        Some(ValueKind::Total)
    } else {
        None
    }
}

/// Reads value cells and classifies them by the label cell to their left.
///
/// When several cells land in the same bucket the last one on the page wins.
pub struct ValuationExtractor;

impl ValuationExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ValuationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuationExtractor {
    /// Classify value cells in page order.
    ///
    /// Scanning stops at the first value cell without a label. Buckets filled
    /// before that point are kept and returned alongside the error.
    pub fn scan(&self, html: &Html) -> (Valuation, Option<ExtractionError>) {
        let mut valuation = Valuation::default();

        for cell in html.select(&TABLE_CELL) {
            let text = element_text(cell);
            if !contains_any(&text, &["Value", "Assessed"])
                || !text.contains('$')
                || !CURRENCY_VALUE.is_match(&text)
            {
                continue;
            }

            let Some(label) = cell
                .prev_siblings()
                .find_map(ElementRef::wrap)
                .map(|label| clean_text(&element_text(label)))
            else {
                return (valuation, Some(ExtractionError::MissingLabel(text)));
            };

            if let Some(kind) = classify_label(&label) {
                let digits: String = text.chars().filter(char::is_ascii_digit).collect();
                trace!("Valuation {:?} from label {:?}: {}", kind, label, digits);
                valuation.set(kind, format!("${}", digits));
            }
        }

        (valuation, None)
    }
}

impl FieldExtractor for ValuationExtractor {
    type Output = Valuation;

    fn extract(&self, html: &Html) -> FieldResult<Valuation> {
        match self.scan(html) {
            (_, Some(err)) => Err(err),
            (valuation, None) => Ok((!valuation.is_empty()).then_some(valuation)),
        }
    }
}
