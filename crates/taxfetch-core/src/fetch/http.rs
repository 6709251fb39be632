//! Blocking HTTP transport using reqwest.

use reqwest::blocking::Client;

use super::{Result, Transport};
use crate::error::FetchError;
use crate::models::config::FetchConfig;

/// HTTP GET transport with a fixed user agent and timeouts.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client from `config`.
    ///
    /// The read timeout bounds the whole request once connected.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout())
            .timeout(config.connect_timeout() + config.read_timeout())
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}
