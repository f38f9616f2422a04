//! Trace data model.
//!
//! Defines the wire-visible chain structures and the internal redirect
//! classification.

use std::collections::BTreeMap;

use serde::Serialize;

/// How the next hop of a chain was discovered.
///
/// `Display` produces the tag stored in a step's `redirectType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// An HTTP 3xx response with a Location header.
    Http(u16),
    /// A `<meta http-equiv="refresh">` tag, with its delay in seconds.
    MetaRefresh(u32),
    /// An immediate script navigation (location assignment or equivalent).
    JavaScript,
    /// A script navigation deferred behind a timer callback.
    JavaScriptTimeout,
}

impl RedirectKind {
    /// Client-side delay in seconds before the redirect fires.
    pub fn delay(&self) -> u32 {
        match self {
            RedirectKind::MetaRefresh(delay) => *delay,
            _ => 0,
        }
    }

    /// Whether the redirect was found in page content rather than the
    /// HTTP response itself.
    pub fn is_html(&self) -> bool {
        !matches!(self, RedirectKind::Http(_))
    }
}

impl std::fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectKind::Http(code) => write!(f, "HTTP {code}"),
            RedirectKind::MetaRefresh(delay) => write!(f, "Meta Refresh ({delay}s)"),
            RedirectKind::JavaScript => f.write_str("JavaScript Redirect"),
            RedirectKind::JavaScriptTimeout => f.write_str("JavaScript Timeout Redirect"),
        }
    }
}

/// One observed hop of a redirect chain.
///
/// Serialized with camelCase field names — this struct is the wire format.
/// Headers use a `BTreeMap` so serialized key order is deterministic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectStep {
    /// The URL requested for this hop.
    pub url: String,
    /// HTTP status code; 0 means the request failed before a response.
    pub status_code: u16,
    /// Status reason phrase, or a failure-category label for code 0.
    pub status_text: String,
    /// Response headers, lower-cased names; empty for failed hops.
    pub headers: BTreeMap<String, String>,
    /// Milliseconds spent on this hop's request (and, for HTML hops, its
    /// body fetch and redirect scan).
    pub response_time: u64,
    /// How the next hop was discovered, if this hop redirected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<String>,
    /// Client-side delay in seconds before an HTML redirect fires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_delay: Option<u32>,
}

impl RedirectStep {
    /// Whether this step's outcome was classified as a redirect.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code) || self.redirect_type.is_some()
    }

    /// Marks the step with the redirect that advanced the chain.
    pub(crate) fn tag(&mut self, kind: RedirectKind) {
        self.redirect_type = Some(kind.to_string());
        if kind.is_html() {
            self.redirect_delay = Some(kind.delay());
        }
    }
}

/// The full result of one trace.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectChain {
    /// Hops in chronological order; never empty.
    pub steps: Vec<RedirectStep>,
    /// URL of the last hop, or the last resolved target on early exit.
    pub final_url: String,
    /// Sum of all steps' response times, in milliseconds.
    pub total_time: u64,
    /// Number of steps classified as redirects.
    pub total_redirects: usize,
}

impl RedirectChain {
    /// Assembles a chain from collected steps, computing the totals.
    pub(crate) fn from_steps(steps: Vec<RedirectStep>, final_url: String) -> Self {
        let total_time = steps.iter().map(|s| s.response_time).sum();
        let total_redirects = steps.iter().filter(|s| s.is_redirect()).count();
        RedirectChain {
            steps,
            final_url,
            total_time,
            total_redirects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(url: &str, status: u16, time: u64) -> RedirectStep {
        RedirectStep {
            url: url.to_string(),
            status_code: status,
            status_text: "OK".to_string(),
            headers: BTreeMap::new(),
            response_time: time,
            redirect_type: None,
            redirect_delay: None,
        }
    }

    #[test]
    fn test_redirect_kind_display() {
        assert_eq!(RedirectKind::Http(301).to_string(), "HTTP 301");
        assert_eq!(RedirectKind::Http(308).to_string(), "HTTP 308");
        assert_eq!(RedirectKind::MetaRefresh(2).to_string(), "Meta Refresh (2s)");
        assert_eq!(RedirectKind::MetaRefresh(0).to_string(), "Meta Refresh (0s)");
        assert_eq!(RedirectKind::JavaScript.to_string(), "JavaScript Redirect");
        assert_eq!(
            RedirectKind::JavaScriptTimeout.to_string(),
            "JavaScript Timeout Redirect"
        );
    }

    #[test]
    fn test_tag_sets_delay_only_for_html_redirects() {
        let mut s = step("https://a.com", 301, 10);
        s.tag(RedirectKind::Http(301));
        assert_eq!(s.redirect_type.as_deref(), Some("HTTP 301"));
        assert_eq!(s.redirect_delay, None);

        let mut s = step("https://a.com", 200, 10);
        s.tag(RedirectKind::MetaRefresh(5));
        assert_eq!(s.redirect_type.as_deref(), Some("Meta Refresh (5s)"));
        assert_eq!(s.redirect_delay, Some(5));

        let mut s = step("https://a.com", 200, 10);
        s.tag(RedirectKind::JavaScript);
        assert_eq!(s.redirect_delay, Some(0));
    }

    #[test]
    fn test_is_redirect_by_status_or_tag() {
        assert!(step("https://a.com", 301, 1).is_redirect());
        assert!(step("https://a.com", 399, 1).is_redirect());
        assert!(!step("https://a.com", 200, 1).is_redirect());
        assert!(!step("https://a.com", 404, 1).is_redirect());
        assert!(!step("https://a.com", 0, 1).is_redirect());

        let mut html_hop = step("https://a.com", 200, 1);
        html_hop.tag(RedirectKind::JavaScript);
        assert!(html_hop.is_redirect());
    }

    #[test]
    fn test_chain_totals() {
        let mut first = step("https://a.com", 301, 12);
        first.tag(RedirectKind::Http(301));
        let last = step("https://b.com", 200, 30);

        let chain =
            RedirectChain::from_steps(vec![first, last], "https://b.com".to_string());
        assert_eq!(chain.total_time, 42);
        assert_eq!(chain.total_redirects, 1);
        assert_eq!(chain.final_url, "https://b.com");
    }

    #[test]
    fn test_wire_format_field_names() {
        let mut s = step("https://a.com", 200, 7);
        s.tag(RedirectKind::MetaRefresh(2));
        let chain = RedirectChain::from_steps(vec![s], "https://a.com".to_string());

        let value = serde_json::to_value(&chain).unwrap();
        assert!(value.get("finalUrl").is_some());
        assert!(value.get("totalTime").is_some());
        assert!(value.get("totalRedirects").is_some());

        let step = &value["steps"][0];
        assert_eq!(step["statusCode"], 200);
        assert_eq!(step["responseTime"], 7);
        assert_eq!(step["redirectType"], "Meta Refresh (2s)");
        assert_eq!(step["redirectDelay"], 2);
    }

    #[test]
    fn test_untagged_step_omits_optional_fields() {
        let chain = RedirectChain::from_steps(
            vec![step("https://a.com", 200, 1)],
            "https://a.com".to_string(),
        );
        let value = serde_json::to_value(&chain).unwrap();
        let step = &value["steps"][0];
        assert!(step.get("redirectType").is_none());
        assert!(step.get("redirectDelay").is_none());
    }
}
