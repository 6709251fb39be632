//! Tax-detail page retrieval.

mod http;

pub use http::HttpTransport;

use scraper::Html;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::models::config::FetchConfig;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Trait for the HTTP layer underneath the fetcher.
pub trait Transport {
    /// GET `url` and return the decoded response body.
    fn get_text(&self, url: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_text(&self, url: &str) -> Result<String> {
        (**self).get_text(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get_text(&self, url: &str) -> Result<String> {
        (**self).get_text(url)
    }
}

/// A parsed tax-detail page and the URL it came from.
pub struct FetchedDocument {
    /// Lookup URL.
    pub url: String,
    /// Parsed markup.
    pub html: Html,
}

impl FetchedDocument {
    /// Parse `body` as an HTML document.
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(body),
        }
    }
}

/// Builds lookup URLs and retrieves tax-detail pages.
pub struct TaxDetailFetcher<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> TaxDetailFetcher<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Lookup URL for `account`. The account is appended verbatim.
    pub fn lookup_url(&self, account: &str) -> String {
        format!("{}?can={}", self.base_url, account)
    }

    /// Fetch and parse the tax-detail page for `account`.
    pub fn fetch(&self, account: &str) -> Result<FetchedDocument> {
        let url = self.lookup_url(account);
        info!("Fetching details for: {}", url);

        let body = self.transport.get_text(&url)?;
        debug!("Received {} bytes for account {}", body.len(), account);

        Ok(FetchedDocument::parse(url, &body))
    }
}

impl TaxDetailFetcher<HttpTransport> {
    /// Fetcher backed by a real HTTP client built from `config`.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, config.base_url.clone()))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CannedTransport;
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_lookup_url() {
        let fetcher =
            TaxDetailFetcher::new(CannedTransport::new(), "https://example.test/detail.jsp");
        assert_eq!(
            fetcher.lookup_url("00123"),
            "https://example.test/detail.jsp?can=00123"
        );
    }

    #[test]
    fn test_fetch_parses_document() {
        let transport = CannedTransport::new().with_page(
            "42",
            "<html><body><table><tr><td>Owner</td></tr></table></body></html>",
        );
        let fetcher = TaxDetailFetcher::new(&transport, "https://example.test/detail.jsp");

        let doc = fetcher.fetch("42").unwrap();
        assert_eq!(doc.url, "https://example.test/detail.jsp?can=42");

        let td = Selector::parse("td").unwrap();
        assert_eq!(doc.html.select(&td).count(), 1);
        assert_eq!(transport.requested.borrow().len(), 1);
    }

    #[test]
    fn test_fetch_propagates_transport_error() {
        let fetcher =
            TaxDetailFetcher::new(CannedTransport::new(), "https://example.test/detail.jsp");
        let err = fetcher.fetch("missing").err().unwrap();
        assert!(err.to_string().contains("connection refused"));
    }
}
