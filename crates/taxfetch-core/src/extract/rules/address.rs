//! US street address detection and splitting.

use serde::Serialize;

use super::patterns::address_patterns;

/// Parsed address parts. Each part is present only when recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl AddressComponents {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }
}

/// Find the first address-looking fragment in `text`.
pub fn find_address(text: &str) -> Option<&str> {
    address_patterns()
        .into_iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str())
}

/// Split an address of the form `street, city state zip`.
///
/// Segments after the second comma are ignored, and trailing empty segments
/// do not count, so `"123 Main St,"` yields nothing.
pub fn parse_address(address: &str) -> AddressComponents {
    let mut parts = AddressComponents::default();

    let mut segments: Vec<&str> = address.split(',').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    if segments.len() < 2 {
        return parts;
    }

    parts.street = Some(segments[0].trim().to_string());

    let tokens: Vec<&str> = segments[1].split_whitespace().collect();
    if let [city @ .., state, zip] = tokens.as_slice() {
        if !city.is_empty() {
            parts.city = Some(city.join(" "));
            parts.state = Some(state.to_string());
            parts.zip = Some(zip.to_string());
        }
    }

    parts
}

/// Find and split the first address in `text`; empty when none is found.
pub fn extract_address(text: &str) -> AddressComponents {
    find_address(text).map(parse_address).unwrap_or_default()
}
