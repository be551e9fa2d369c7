//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with browser-like headers
//! - GET requests for catalog and product pages
//! - Error classification (timeouts vs. other transport failures)

use crate::config::{CrawlerConfig, HeaderConfig};
use crate::VitrineError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds the HTTP client shared by every request of a crawl run
///
/// The client sends the configured headers on every request, decodes
/// gzip/deflate/brotli bodies, follows redirects up to the configured hop
/// limit, and fails any request that exceeds the configured timeout.
///
/// # Example
///
/// ```no_run
/// use vitrine::config::{CrawlerConfig, HeaderConfig};
/// use vitrine::crawler::build_http_client;
///
/// let client = build_http_client(&HeaderConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    headers: &HeaderConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, VitrineError> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT, header_value(&headers.accept)?);
    default_headers.insert(ACCEPT_ENCODING, header_value(&headers.accept_encoding)?);
    default_headers.insert(ACCEPT_LANGUAGE, header_value(&headers.accept_language)?);
    default_headers.insert(USER_AGENT, header_value(&headers.user_agent)?);

    let client = Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(crawler.timeout_secs))
        .redirect(Policy::limited(crawler.max_redirects))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

fn header_value(value: &str) -> Result<HeaderValue, VitrineError> {
    HeaderValue::from_str(value).map_err(|_| {
        crate::ConfigError::Validation(format!("invalid header value: '{}'", value)).into()
    })
}

/// Fetches a page and returns its body as text
///
/// Any transport failure is returned as an error; there is no retry.
/// Non-success status codes are logged and the body is still returned,
/// since a catalog page past the last one usually renders an empty
/// listing rather than a clean 404.
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(VitrineError::Timeout)` - The request exceeded the client timeout
/// * `Err(VitrineError::Http)` - Any other transport failure
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, VitrineError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} returned HTTP {}", url, status.as_u16());
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> VitrineError {
    if error.is_timeout() {
        VitrineError::Timeout {
            url: url.to_string(),
        }
    } else {
        VitrineError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
