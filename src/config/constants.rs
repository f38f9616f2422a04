//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including the hop cap, timeouts, and size limits.

// Redirect handling
/// Maximum number of redirect hops to follow per trace
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 20;

// Network operation timeouts
/// Per-hop request timeout in seconds
/// Generous enough for slow-but-legitimate origins; anything beyond this is
/// reported as a "Request Timeout" hop failure
pub const HOP_TIMEOUT_SECS: u64 = 15;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Some origins serve different redirect behavior (or block outright) for
/// non-browser agents, so hops are issued with a realistic browser UA.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// HTML bodies larger than this are not scanned for in-page redirects
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Script content size limits
/// Maximum script content size in bytes (100KB per script)
/// Limits the amount of inline JavaScript the scanner inspects per tag
pub const MAX_SCRIPT_CONTENT_SIZE: usize = 100 * 1024;

// Header size limits
/// Maximum HTTP header value length in characters (1000 chars)
/// Prevents bloated chain payloads from very long header values
/// (e.g. accept-ch headers); longer values are truncated
pub const MAX_HEADER_VALUE_LENGTH: usize = 1000;

// HTTP boundary
/// Default port for the trace HTTP server
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Fallback status text for codes without a canonical reason phrase
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Status";
