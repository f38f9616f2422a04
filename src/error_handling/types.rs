//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors a trace can fail with before or during the hop loop.
///
/// Hop-level network failures are NOT represented here — they are absorbed
/// into the chain as a terminal step carrying a [`HopErrorKind`] label.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The initial URL did not parse as an absolute http(s) URL.
    /// Rejected before the first hop; no partial chain is produced.
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// A redirect target (Location header or HTML hint) could not be
    /// resolved to an absolute URL. Recovered locally by the driver — the
    /// trace stops with the last good step standing.
    #[error("Invalid redirect target: {0}")]
    InvalidRedirectTarget(String),
}

/// Categories of per-hop request failures.
///
/// Each category maps to a stable, user-facing label stored in the failure
/// step's `statusText` (the step itself carries status code 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum HopErrorKind {
    /// The hop exceeded the per-request timeout.
    Timeout,
    /// The hostname did not resolve.
    DnsResolutionFailed,
    /// The target host actively refused the connection.
    ConnectionRefused,
    /// The server presented an expired TLS certificate.
    SslCertificateExpired,
    /// TLS verification failed for a reason other than expiry.
    SslCertificateInvalid,
    /// Any other network-level failure.
    ConnectionFailed,
}

impl HopErrorKind {
    /// Returns the stable user-facing label for this failure category.
    pub fn as_str(&self) -> &'static str {
        match self {
            HopErrorKind::Timeout => "Request Timeout",
            HopErrorKind::DnsResolutionFailed => "DNS Resolution Failed",
            HopErrorKind::ConnectionRefused => "Connection Refused",
            HopErrorKind::SslCertificateExpired => "SSL Certificate Expired",
            HopErrorKind::SslCertificateInvalid => "SSL Certificate Invalid",
            HopErrorKind::ConnectionFailed => "Connection Failed",
        }
    }
}

impl std::fmt::Display for HopErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_hop_error_kind_labels() {
        assert_eq!(HopErrorKind::Timeout.as_str(), "Request Timeout");
        assert_eq!(
            HopErrorKind::DnsResolutionFailed.as_str(),
            "DNS Resolution Failed"
        );
        assert_eq!(HopErrorKind::ConnectionRefused.as_str(), "Connection Refused");
        assert_eq!(
            HopErrorKind::SslCertificateExpired.as_str(),
            "SSL Certificate Expired"
        );
        assert_eq!(
            HopErrorKind::SslCertificateInvalid.as_str(),
            "SSL Certificate Invalid"
        );
        assert_eq!(HopErrorKind::ConnectionFailed.as_str(), "Connection Failed");
    }

    #[test]
    fn test_all_hop_error_kinds_have_labels() {
        for kind in HopErrorKind::iter() {
            assert!(
                !kind.as_str().is_empty(),
                "{:?} should have a non-empty label",
                kind
            );
        }
    }

    #[test]
    fn test_trace_error_display() {
        let err = TraceError::InvalidUrl("not a url".to_string());
        assert_eq!(err.to_string(), "Invalid URL provided: not a url");

        let err = TraceError::InvalidRedirectTarget("::bad::".to_string());
        assert_eq!(err.to_string(), "Invalid redirect target: ::bad::");
    }
}
