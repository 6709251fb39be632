//! Common regex patterns and selectors for tax-detail pages.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Selector;

lazy_static! {
    // Dollar amount with cents: $1,234.56
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"\$\d+[,\d]*\.\d{2}"
    ).unwrap();

    // Dollar figure, cents optional: $50,000
    pub static ref CURRENCY_VALUE: Regex = Regex::new(
        r"\$\d+[,\d]*"
    ).unwrap();

    // House number, street suffix, city, state, zip
    pub static ref ADDRESS_FULL: Regex = Regex::new(
        r"\d+\s+[A-Za-z\s]+\s+(?:St|Street|Ave|Avenue|Dr|Drive|Rd|Road|Ln|Lane|Blvd|Boulevard|Ct|Court|Pl|Place|Way)[,\s]+[A-Za-z\s]+,?\s*[A-Z]{2}\s*\d{5}"
    ).unwrap();

    // House number, city, state, zip
    pub static ref ADDRESS_NUMBERED: Regex = Regex::new(
        r"\d+\s+[A-Za-z\s]+[,\s]+[A-Za-z\s]+,?\s*[A-Z]{2}\s*\d{5}"
    ).unwrap();

    // Street suffix, city, state, zip
    pub static ref ADDRESS_SUFFIXED: Regex = Regex::new(
        r"[A-Za-z\s]+\s+(?:St|Ave|Dr|Rd|Ln|Blvd|Ct|Pl|Way)[,\s]+[A-Za-z\s]+,?\s*[A-Z]{2}\s*\d{5}"
    ).unwrap();

    pub static ref TABLE_CELL: Selector = Selector::parse("td").unwrap();

    pub static ref AMOUNT_CELL: Selector = Selector::parse("td, span").unwrap();
}

/// Address patterns, most specific first.
pub fn address_patterns() -> [&'static Regex; 3] {
    [&*ADDRESS_FULL, &*ADDRESS_NUMBERED, &*ADDRESS_SUFFIXED]
}
