//! Wire types and shared state for the trace server.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::trace::{RequestIssuer, TraceOptions};

/// Body of a trace request.
#[derive(Debug, Deserialize)]
pub struct TraceRequest {
    /// The URL to trace.
    pub url: Option<String>,
}

/// Error body returned by the boundary.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short, user-facing error message.
    pub error: String,
    /// Short diagnostic string; never an internal backtrace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub(crate) fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            details: None,
        }
    }

    pub(crate) fn with_details(error: &str, details: String) -> Self {
        ErrorResponse {
            error: error.to_string(),
            details: Some(details),
        }
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    /// Issuer shared across traces; each trace owns its own mutable state.
    pub issuer: Arc<RequestIssuer>,
    /// Options applied to every trace.
    pub options: TraceOptions,
}
