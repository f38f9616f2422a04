//! Request issuing.
//!
//! Performs one outbound request per hop, with redirects disabled so the
//! chain driver observes every hop itself.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use reqwest::Method;
use url::Url;

use crate::config::{
    MAX_HEADER_VALUE_LENGTH, MAX_RESPONSE_BODY_SIZE, NAVIGATION_HEADERS, UNKNOWN_STATUS_TEXT,
};

/// The observable outcome of one hop request.
#[derive(Debug, Clone)]
pub struct HopResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Status reason phrase.
    pub status_text: String,
    /// Response headers, lower-cased names.
    pub headers: BTreeMap<String, String>,
}

impl HopResponse {
    /// Whether the status indicates an HTTP redirect.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Whether the status indicates success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Whether the response declares an HTML content type.
    pub fn is_html(&self) -> bool {
        self.headers
            .get("content-type")
            .is_some_and(|ct| ct.trim_start().starts_with("text/html"))
    }

    /// The Location header, if present.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").map(String::as_str)
    }
}

/// Issues hop requests against a client with redirects disabled.
///
/// Two request shapes are supported: a header-only HEAD probe for pure
/// HTTP-redirect tracing, and a body-fetching GET used only when a 2xx HTML
/// response must be scanned for in-page redirects. Neither mutates chain
/// state — results are returned to the chain driver.
pub struct RequestIssuer {
    client: Arc<reqwest::Client>,
}

impl RequestIssuer {
    /// Creates an issuer over a shared client.
    ///
    /// The client must have redirect following disabled; see
    /// `initialization::init_client`.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        RequestIssuer { client }
    }

    /// Issues the header-only probe for one hop.
    ///
    /// Sends a HEAD request with browser-like navigation headers. Origins
    /// that reject HEAD outright (405/501) are retried once with GET — the
    /// fallback from the heavier to the lighter strategy keeps the hop
    /// observable instead of failing the trace.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` on network failure; callers
    /// classify it into a failure-category label.
    pub async fn probe(&self, url: &Url) -> Result<HopResponse, reqwest::Error> {
        let response = self.request(Method::HEAD, url).send().await?;

        if matches!(response.status().as_u16(), 405 | 501) {
            debug!("HEAD rejected by {url} ({}), retrying as GET", response.status());
            let response = self.request(Method::GET, url).send().await?;
            return Ok(to_hop_response(&response));
        }

        Ok(to_hop_response(&response))
    }

    /// Fetches the response body for an HTML hop.
    ///
    /// Bodies larger than `MAX_RESPONSE_BODY_SIZE` are not scanned and come
    /// back empty.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` on network failure.
    pub async fn fetch_body(&self, url: &Url) -> Result<String, reqwest::Error> {
        let response = self.request(Method::GET, url).send().await?;
        let bytes = response.bytes().await?;
        if bytes.len() > MAX_RESPONSE_BODY_SIZE {
            debug!("Skipping redirect scan of large body: {} bytes", bytes.len());
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    fn request(&self, method: Method, url: &Url) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, url.clone());
        for (name, value) in NAVIGATION_HEADERS {
            builder = builder.header(*name, *value);
        }
        builder
    }
}

/// Converts a response into the hop-visible form (status, reason, headers).
fn to_hop_response(response: &reqwest::Response) -> HopResponse {
    let status = response.status();
    HopResponse {
        status_code: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or(UNKNOWN_STATUS_TEXT)
            .to_string(),
        headers: extract_headers(response.headers()),
    }
}

/// Extracts response headers as a lower-cased name/value map.
///
/// Values are truncated at `MAX_HEADER_VALUE_LENGTH`; non-ASCII values are
/// dropped to empty strings rather than failing the hop.
pub(crate) fn extract_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let mut value = value.to_str().unwrap_or_default().to_string();
            if value.len() > MAX_HEADER_VALUE_LENGTH {
                value.truncate(MAX_HEADER_VALUE_LENGTH);
            }
            (name.as_str().to_lowercase(), value)
        })
        .collect()
}
