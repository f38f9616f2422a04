//! Hop failure categorization.
//!
//! This module classifies request errors into the stable failure categories
//! reported in a chain's terminal failure step.

use super::types::HopErrorKind;

/// Categorizes a `reqwest::Error` into a [`HopErrorKind`].
///
/// reqwest exposes timeouts and connect failures as predicates, but DNS and
/// TLS causes only surface in the underlying error chain, so those are
/// matched against the source messages.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` from a failed hop
///
/// # Returns
///
/// The appropriate `HopErrorKind` for the error.
pub fn categorize_hop_error(error: &reqwest::Error) -> HopErrorKind {
    if error.is_timeout() {
        return HopErrorKind::Timeout;
    }

    // Walk the source chain for causes reqwest has no predicate for
    let chain = error_chain_text(error);

    if chain.contains("dns error")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
    {
        return HopErrorKind::DnsResolutionFailed;
    }

    if chain.contains("connection refused") {
        return HopErrorKind::ConnectionRefused;
    }

    if chain.contains("certificate") || chain.contains("handshake") {
        if chain.contains("expired") {
            return HopErrorKind::SslCertificateExpired;
        }
        return HopErrorKind::SslCertificateInvalid;
    }

    HopErrorKind::ConnectionFailed
}

/// Collects the lowercased display text of an error and all its sources.
fn error_chain_text(error: &reqwest::Error) -> String {
    let mut text = error.to_string().to_lowercase();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string().to_lowercase());
        source = cause.source();
    }
    text
}
