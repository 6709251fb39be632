//! Current tax due extraction.

use scraper::Html;

use super::patterns::{AMOUNT_CELL, CURRENCY_AMOUNT};
use super::{element_text, FieldExtractor, FieldResult};

/// Picks the first dollars-and-cents figure on the page.
pub struct TaxDueExtractor;

impl TaxDueExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TaxDueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TaxDueExtractor {
    type Output = String;

    fn extract(&self, html: &Html) -> FieldResult<String> {
        for cell in html.select(&AMOUNT_CELL) {
            let text = element_text(cell);
            if !text.contains('$') || !CURRENCY_AMOUNT.is_match(&text) {
                continue;
            }
            if let Some(amount) = normalize_tax_amount(&text) {
                return Ok(Some(amount));
            }
        }
        Ok(None)
    }
}

/// Reduce `raw` to digits and decimal points, drop leading zeros, prefix `$`.
///
/// Every digit in `raw` is kept, so surrounding numbers are concatenated too.
pub fn normalize_tax_amount(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let amount = digits.trim_start_matches('0');

    (!amount.is_empty()).then(|| format!("${}", amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tax_amount() {
        assert_eq!(normalize_tax_amount("$ 045.00"), Some("$45.00".to_string()));
        assert_eq!(normalize_tax_amount("$1,234.56"), Some("$1234.56".to_string()));
        assert_eq!(normalize_tax_amount("Total Due: $2,001.10"), Some("$2001.10".to_string()));
        assert_eq!(normalize_tax_amount("$000"), None);
        assert_eq!(normalize_tax_amount("none"), None);
    }

    #[test]
    fn test_extract_first_amount() {
        let html = Html::parse_document(
            r#"<table>
                <tr><td>Account</td><td>00123</td></tr>
                <tr><td>Homestead cap $ pending</td></tr>
                <tr><td>Total Amount Due</td><td>$3,456.78</td></tr>
                <tr><td>Prior Years Due</td><td>$10.00</td></tr>
            </table>"#,
        );

        let amount = TaxDueExtractor::new().extract(&html).unwrap();
        assert_eq!(amount, Some("$3456.78".to_string()));
    }

    #[test]
    fn test_extract_amount_in_span() {
        let html = Html::parse_document(
            r#"<div>Amount due: <span>$0,512.40</span></div>"#,
        );

        let amount = TaxDueExtractor::new().extract(&html).unwrap();
        assert_eq!(amount, Some("$512.40".to_string()));
    }

    #[test]
    fn test_extract_ignores_inline_script() {
        let html = Html::parse_document(
            r#"<table>
                <tr><td><script>var shown = "$1.00";</script>Prior Years</td></tr>
                <tr><td>Total Amount Due</td><td>$3,456.78</td></tr>
            </table>"#,
        );

        let amount = TaxDueExtractor::new().extract(&html).unwrap();
        assert_eq!(amount, Some("$3456.78".to_string()));
    }

    #[test]
    fn test_extract_no_amount() {
        let html = Html::parse_document("<table><tr><td>$ unknown</td></tr></table>");
        assert_eq!(TaxDueExtractor::new().extract(&html).unwrap(), None);
    }
}
