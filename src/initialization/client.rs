//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP client used for
//! hop requests.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for hop requests.
///
/// Creates a `reqwest::Client` with redirects disabled so the chain driver
/// can observe and classify every hop itself. Configured with:
/// - User-Agent header from options
/// - Per-request timeout from options
/// - TCP connect timeout
///
/// # Arguments
///
/// * `config` - Runtime configuration containing user-agent and timeout settings
///
/// # Returns
///
/// A configured HTTP client with redirects disabled.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
