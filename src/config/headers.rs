//! HTTP header constants.
//!
//! This module defines the browser-like navigation headers sent on every hop
//! and the CORS headers attached to every boundary response.

/// Realistic browser navigation headers sent with each hop request.
///
/// Origins commonly vary redirect behavior (or refuse to answer) based on
/// header analysis, so hops carry the header set a browser sends for a
/// top-level navigation. Header names use lowercase to match the wire form.
pub const NAVIGATION_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
];

// CORS response headers
// Every boundary response carries these, including errors and pre-flight
/// Allowed origin for cross-origin callers
pub const CORS_ALLOW_ORIGIN: (&str, &str) = ("access-control-allow-origin", "*");
/// Allowed request headers for cross-origin callers
pub const CORS_ALLOW_HEADERS: (&str, &str) = ("access-control-allow-headers", "Content-Type");
/// Allowed methods for cross-origin callers
pub const CORS_ALLOW_METHODS: (&str, &str) = ("access-control-allow-methods", "GET, POST, OPTIONS");

/// List of CORS headers to attach to every boundary response.
pub const CORS_HEADERS: &[(&str, &str)] = &[CORS_ALLOW_ORIGIN, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS];
