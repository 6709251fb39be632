//! Page-level extractor combining the five field rules.

use scraper::Html;
use serde::Serialize;
use tracing::{debug, warn};

use super::rules::{
    extract_address, AddressComponents, FieldExtractor, FieldResult, RowExtractor,
    TaxDueExtractor, Valuation, ValuationExtractor,
};
use crate::fetch::FetchedDocument;
use crate::models::schema;

/// Placeholder stored when an extractor ran but failed.
pub const SENTINEL: &str = "Unable to extract";

/// Fields pulled from one tax-detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub owner_address: AddressComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    pub property: AddressComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment: Option<String>,
    pub valuation: Valuation,
}

impl ExtractedFields {
    /// Output columns set by extraction, in schema order. Unset fields are omitted.
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        let owner = &self.owner_address;
        let property = &self.property;
        let valuation = &self.valuation;

        [
            (schema::CURRENT_OWNER_NAME, &self.owner_name),
            (schema::CURRENT_OWNER_STREET, &owner.street),
            (schema::CURRENT_OWNER_CITY, &owner.city),
            (schema::CURRENT_OWNER_STATE, &owner.state),
            (schema::CURRENT_OWNER_ZIP, &owner.zip),
            (schema::CURRENT_PROP_ADDRESS, &self.property_address),
            (schema::CURRENT_PROP_STREET, &property.street),
            (schema::CURRENT_PROP_CITY, &property.city),
            (schema::CURRENT_PROP_STATE, &property.state),
            (schema::CURRENT_PROP_ZIP, &property.zip),
            (schema::CURRENT_TAX_DUE, &self.tax_due),
            (schema::LAST_PAYMENT_INFO, &self.last_payment),
            (schema::CURRENT_TOTAL_VALUE, &valuation.total),
            (schema::CURRENT_LAND_VALUE, &valuation.land),
            (schema::CURRENT_IMPROVEMENT_VALUE, &valuation.improvement),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }
}

/// Runs the owner, property, tax-due, payment and valuation rules.
///
/// A failing rule only affects its own fields.
pub struct TaxDetailExtractor {
    owner: RowExtractor,
    property: RowExtractor,
    tax_due: TaxDueExtractor,
    payment: RowExtractor,
    valuation: ValuationExtractor,
}

impl TaxDetailExtractor {
    pub fn new() -> Self {
        Self {
            owner: RowExtractor::owner(),
            property: RowExtractor::property(),
            tax_due: TaxDueExtractor::new(),
            payment: RowExtractor::payment(),
            valuation: ValuationExtractor::new(),
        }
    }

    /// Extract every field from a fetched page.
    pub fn extract(&self, document: &FetchedDocument) -> ExtractedFields {
        let fields = self.extract_html(&document.html);
        debug!(
            "Extracted {} fields from {}",
            fields.columns().len(),
            document.url
        );
        fields
    }

    /// Extract every field from parsed markup.
    pub fn extract_html(&self, html: &Html) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        match self.owner.extract(html) {
            Ok(Some(text)) => {
                fields.owner_address = extract_address(&text);
                fields.owner_name = Some(text);
            }
            Ok(None) => {}
            Err(e) => fields.owner_name = Some(sentinel("owner", e)),
        }

        match self.property.extract(html) {
            Ok(Some(text)) => {
                fields.property = extract_address(&text);
                fields.property_address = Some(text);
            }
            Ok(None) => {}
            Err(e) => fields.property_address = Some(sentinel("property", e)),
        }

        fields.tax_due = or_sentinel("tax due", self.tax_due.extract(html));
        fields.last_payment = or_sentinel("payment", self.payment.extract(html));

        let (valuation, failure) = self.valuation.scan(html);
        fields.valuation = valuation;
        if let Some(e) = failure {
            fields.valuation.total = Some(sentinel("valuation", e));
        }

        fields
    }
}

impl Default for TaxDetailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn or_sentinel(rule: &str, result: FieldResult<String>) -> Option<String> {
    result.unwrap_or_else(|e| Some(sentinel(rule, e)))
}

fn sentinel(rule: &str, err: impl std::fmt::Display) -> String {
    warn!("Could not extract {}: {}", rule, err);
    SENTINEL.to_string()
}
