//! HTML redirect scanning.
//!
//! Inspects a fetched HTML body for meta-refresh and script-based
//! navigation. Invoked only for 2xx responses with an HTML content type —
//! when the HTTP response itself was not a redirect.
//!
//! Script detection is pattern matching over script text, not evaluation;
//! it is inherently heuristic and kept behind this module's single `scan`
//! entry point so it can be swapped for a stricter parser.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::config::MAX_SCRIPT_CONTENT_SIZE;
use crate::trace::resolver;
use crate::trace::types::RedirectKind;

/// An in-page redirect discovered by the scanner.
#[derive(Debug, Clone)]
pub struct RedirectHint {
    /// Absolute target of the redirect.
    pub target: Url,
    /// How the redirect was expressed.
    pub kind: RedirectKind,
}

/// `content="[delay];url=<target>"`, case-insensitive, optional quoting.
static META_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*(\d+)?\s*;\s*url\s*=\s*['"]?([^'"\s>]+)"#)
        .expect("meta refresh pattern is valid")
});

/// Immediate navigation: assignment to the location object or its href.
static LOCATION_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:window\.|document\.|top\.|self\.)?location(?:\.href)?\s*=\s*["']([^"']+)["']"#)
        .expect("location assignment pattern is valid")
});

/// Immediate navigation: `location.replace('...')`.
static LOCATION_REPLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"location\.replace\(\s*["']([^"']+)["']"#)
        .expect("location replace pattern is valid")
});

/// Immediate navigation: `window.open('...', '_self')`.
static WINDOW_OPEN_SELF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.open\(\s*["']([^"']+)["']\s*,\s*["']_self["']"#)
        .expect("window.open pattern is valid")
});

/// Deferred navigation: a timer callback assigning a location target.
static TIMEOUT_REDIRECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)setTimeout\s*\(.{0,400}?location(?:\.href)?\s*=\s*["']([^"']+)["']"#,
    )
    .expect("timeout redirect pattern is valid")
});

/// Scans an HTML body for a redirect, first match wins.
///
/// Detection order: meta refresh, immediate script navigation, deferred
/// (timer) script navigation, then a looser whole-document fallback.
/// Targets resolve against `base`; an unresolvable target — or malformed
/// HTML — yields `None` rather than aborting the chain.
pub fn scan(html: &str, base: &Url) -> Option<RedirectHint> {
    let (meta_contents, scripts) = collect_document_parts(html);

    // 1. Meta refresh
    for content in &meta_contents {
        if let Some(captures) = META_CONTENT_RE.captures(content) {
            let delay = captures
                .get(1)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0);
            let target = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
            return make_hint(base, target, RedirectKind::MetaRefresh(delay));
        }
    }

    // 2. Immediate script navigation. An assignment that only appears
    // inside a setTimeout callback belongs to the deferred pass below, so
    // each candidate is required to precede any timer match in its script.
    for script in &scripts {
        let timeout_start = TIMEOUT_REDIRECT_RE
            .find(script)
            .map(|m| m.start())
            .unwrap_or(usize::MAX);
        let immediate = [
            &*LOCATION_ASSIGN_RE,
            &*LOCATION_REPLACE_RE,
            &*WINDOW_OPEN_SELF_RE,
        ]
        .iter()
        .filter_map(|re| {
            re.captures(script)
                .and_then(|c| c.get(0).map(|m| (m.start(), c)))
        })
        .min_by_key(|(start, _)| *start);

        if let Some((start, captures)) = immediate {
            if start < timeout_start {
                let target = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                return make_hint(base, target, RedirectKind::JavaScript);
            }
        }
    }

    // 3. Deferred script navigation
    for script in &scripts {
        if let Some(captures) = TIMEOUT_REDIRECT_RE.captures(script) {
            let target = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            return make_hint(base, target, RedirectKind::JavaScriptTimeout);
        }
    }

    // 4. Loose fallback over the whole document
    if let Some(captures) = LOCATION_ASSIGN_RE.captures(html) {
        let target = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        return make_hint(base, target, RedirectKind::JavaScript);
    }

    None
}

/// Pulls meta-refresh content values and inline script text out of the
/// document, in document order.
fn collect_document_parts(html: &str) -> (Vec<String>, Vec<String>) {
    let document = Html::parse_document(html);

    let meta_selector = parse_selector_with_fallback("meta", "meta refresh extraction");
    let mut meta_contents = Vec::new();
    for element in document.select(&meta_selector) {
        let is_refresh = element
            .value()
            .attr("http-equiv")
            .is_some_and(|v| v.eq_ignore_ascii_case("refresh"));
        if is_refresh {
            if let Some(content) = element.value().attr("content") {
                meta_contents.push(content.to_string());
            }
        }
    }

    let script_selector = parse_selector_with_fallback("script", "script extraction");
    let mut scripts = Vec::new();
    for element in document.select(&script_selector) {
        if element.value().attr("src").is_some() {
            continue;
        }
        let mut text = element.text().collect::<String>();
        if text.len() > MAX_SCRIPT_CONTENT_SIZE {
            text.truncate(
                (0..=MAX_SCRIPT_CONTENT_SIZE)
                    .rev()
                    .find(|i| text.is_char_boundary(*i))
                    .unwrap_or(0),
            );
        }
        if !text.trim().is_empty() {
            scripts.push(text);
        }
    }

    (meta_contents, scripts)
}

fn make_hint(base: &Url, target: &str, kind: RedirectKind) -> Option<RedirectHint> {
    match resolver::resolve(base, target) {
        Ok(target) => Some(RedirectHint { target, kind }),
        Err(e) => {
            debug!("Discarding in-page redirect with unresolvable target: {e}");
            None
        }
    }
}

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches
/// nothing, so scanning degrades to "no hint" instead of panicking.
fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)")
            .expect("fallback selector '*:not(*)' should always parse")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://a.com/x/page").unwrap()
    }

    fn scan_kind(html: &str) -> Option<(String, RedirectKind)> {
        scan(html, &base()).map(|h| (h.target.to_string(), h.kind))
    }

    #[test]
    fn test_meta_refresh_with_delay() {
        let html = r#"<html><head>
            <meta http-equiv="refresh" content="2;url=https://b.com">
            </head><body></body></html>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/");
        assert_eq!(kind, RedirectKind::MetaRefresh(2));
    }

    #[test]
    fn test_meta_refresh_without_delay_defaults_to_zero() {
        let html = r#"<meta http-equiv="refresh" content=";url=/landing">"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://a.com/landing");
        assert_eq!(kind, RedirectKind::MetaRefresh(0));
    }

    #[test]
    fn test_meta_refresh_case_insensitive_and_quoted() {
        let html = r#"<META HTTP-EQUIV="Refresh" CONTENT="5; URL='https://b.com/p'">"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/p");
        assert_eq!(kind, RedirectKind::MetaRefresh(5));
    }

    #[test]
    fn test_meta_refresh_without_url_is_ignored() {
        // A bare reload directive has no target to follow
        let html = r#"<meta http-equiv="refresh" content="30">"#;
        assert!(scan_kind(html).is_none());
    }

    #[test]
    fn test_js_location_href_assignment() {
        let html = r#"<script>window.location.href = "https://b.com/app";</script>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/app");
        assert_eq!(kind, RedirectKind::JavaScript);
    }

    #[test]
    fn test_js_bare_location_assignment() {
        let html = r#"<script>location = '/moved';</script>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://a.com/moved");
        assert_eq!(kind, RedirectKind::JavaScript);
    }

    #[test]
    fn test_js_location_replace() {
        let html = r#"<script>window.location.replace('https://b.com/r');</script>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/r");
        assert_eq!(kind, RedirectKind::JavaScript);
    }

    #[test]
    fn test_js_window_open_self() {
        let html = r#"<script>window.open("https://b.com/o", "_self");</script>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/o");
        assert_eq!(kind, RedirectKind::JavaScript);
    }

    #[test]
    fn test_js_window_open_new_tab_is_not_a_redirect() {
        let html = r#"<script>window.open("https://b.com/popup", "_blank");</script>"#;
        assert!(scan_kind(html).is_none());
    }

    #[test]
    fn test_js_timeout_redirect() {
        let html = r#"<script>
            setTimeout(function () {
                window.location.href = "https://b.com/later";
            }, 3000);
        </script>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/later");
        assert_eq!(kind, RedirectKind::JavaScriptTimeout);
    }

    #[test]
    fn test_direct_assignment_beats_timer_in_same_script() {
        let html = r#"<script>
            location.href = "https://b.com/now";
            setTimeout(() => { location.href = "https://b.com/later"; }, 100);
        </script>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/now");
        assert_eq!(kind, RedirectKind::JavaScript);
    }

    #[test]
    fn test_meta_refresh_wins_over_script() {
        let html = r#"<html><head>
            <meta http-equiv="refresh" content="0;url=https://b.com/meta">
            <script>location.href = "https://b.com/js";</script>
            </head></html>"#;
        let (target, kind) = scan_kind(html).unwrap();
        assert_eq!(target, "https://b.com/meta");
        assert_eq!(kind, RedirectKind::MetaRefresh(0));
    }

    #[test]
    fn test_relative_script_target_resolves_against_page() {
        let html = r#"<script>location.href = "next";</script>"#;
        let (target, _) = scan_kind(html).unwrap();
        assert_eq!(target, "https://a.com/x/next");
    }

    #[test]
    fn test_no_redirect_found() {
        let html = r#"<html><body><p>Welcome</p>
            <script>console.log("analytics", location.hostname);</script>
            </body></html>"#;
        assert!(scan_kind(html).is_none());
    }

    #[test]
    fn test_unresolvable_target_treated_as_no_hint() {
        let html = r#"<script>location.href = "javascript:void(0)";</script>"#;
        assert!(scan_kind(html).is_none());
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<html><<<>>><meta content garbage <script>location.href=";
        assert!(scan_kind(html).is_none());
    }

    #[test]
    fn test_empty_body() {
        assert!(scan_kind("").is_none());
    }
}
