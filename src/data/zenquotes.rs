//! Zen Quotes API client
//!
//! This module fetches quotes from the Zen Quotes API and parses the wire
//! format (`[{"q": ..., "a": ..., "h": ...}]`) into our Quote structures.
//! Every failure is logged as a warning with the request URL before it is
//! returned to the caller.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{Quote, QuoteMode};

/// Base URL for the Zen Quotes API
pub const ZEN_QUOTES_BASE_URL: &str = "https://zenquotes.io/api";

/// Request timeout for each API call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching quotes
#[derive(Debug, Error)]
pub enum FetchError {
    /// The connection could not be established
    #[error("Connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response within the request timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response status
    #[error("Invalid HTTP status code {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Response body is not valid JSON
    #[error("Invalid JSON content in response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON is valid but an element lacks the quote or author key
    #[error("Key missing in JSON content from {url}: {source}")]
    Shape {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response held an empty list
    #[error("No quotes in response from {url}")]
    Empty { url: String },
}

/// Anything that can produce quotes for a given mode
///
/// Implemented by [`ZenQuotesClient`]; tests substitute in-memory sources.
#[allow(async_fn_in_trait)]
pub trait QuoteSource {
    async fn fetch(&self, mode: QuoteMode) -> Result<Vec<Quote>, FetchError>;
}

impl<T: QuoteSource + ?Sized> QuoteSource for &T {
    async fn fetch(&self, mode: QuoteMode) -> Result<Vec<Quote>, FetchError> {
        (**self).fetch(mode).await
    }
}

/// A single quote as returned by the API
#[derive(Debug, Deserialize)]
struct WireQuote {
    /// Quote text
    q: String,
    /// Author
    a: String,
}

impl From<WireQuote> for Quote {
    fn from(wire: WireQuote) -> Self {
        Quote {
            text: wire.q,
            author: wire.a,
        }
    }
}

/// Client for fetching quotes from the Zen Quotes API
#[derive(Debug, Clone)]
pub struct ZenQuotesClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ZenQuotesClient {
    /// Create a new ZenQuotesClient against the public API
    pub fn new() -> Self {
        Self::with_base_url(ZEN_QUOTES_BASE_URL)
    }

    /// Create a new ZenQuotesClient with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL for a mode
    pub fn url_for(&self, mode: QuoteMode) -> String {
        format!("{}/{}", self.base_url, mode.endpoint())
    }

    /// Fetch quotes for the given mode
    ///
    /// # Returns
    /// * `Ok(Vec<Quote>)` - Quotes in response order, never empty
    /// * `Err(FetchError)` - Transport, status, JSON or shape failure
    pub async fn fetch_quotes(&self, mode: QuoteMode) -> Result<Vec<Quote>, FetchError> {
        let url = self.url_for(mode);
        debug!("Requesting Zen Quotes: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Invalid HTTP status code: {}", url);
            return Err(FetchError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(&url, e))?;

        parse_quotes(&url, &text)
    }
}

impl QuoteSource for ZenQuotesClient {
    async fn fetch(&self, mode: QuoteMode) -> Result<Vec<Quote>, FetchError> {
        self.fetch_quotes(mode).await
    }
}

/// Classify a reqwest error raised while sending or reading the body
fn transport_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        warn!("Timeout when requesting Zen Quotes: {}", url);
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        warn!("ConnectionError when requesting Zen Quotes: {}", url);
        FetchError::Connection {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Parse a response body into quotes
///
/// A single element without `q` or `a` fails the whole response.
pub fn parse_quotes(url: &str, body: &str) -> Result<Vec<Quote>, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|source| {
        warn!("Invalid JSON content in response: {}", url);
        FetchError::MalformedResponse {
            url: url.to_string(),
            source,
        }
    })?;

    let wire: Vec<WireQuote> = serde_json::from_value(value).map_err(|source| {
        warn!("Key missing in JSON content: {}", url);
        FetchError::Shape {
            url: url.to_string(),
            source,
        }
    })?;

    if wire.is_empty() {
        warn!("No quotes in response: {}", url);
        return Err(FetchError::Empty {
            url: url.to_string(),
        });
    }

    Ok(wire.into_iter().map(Quote::from).collect())
}
