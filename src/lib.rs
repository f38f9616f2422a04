//! redirect_tracer library: redirect-chain tracing functionality
//!
//! This library traces the full chain of HTTP and HTML-level redirects
//! starting from a URL, reporting each hop's status, headers, and timing,
//! and the eventual destination. Redirects are followed manually, so every
//! hop is observed: HTTP 3xx responses, `<meta http-equiv="refresh">` tags,
//! and common JavaScript navigation idioms.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use redirect_tracer::{trace_redirects, Config, RequestIssuer, TraceOptions};
//! use redirect_tracer::initialization::init_client;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_client(&Config::default())?;
//! let issuer = RequestIssuer::new(client);
//!
//! let chain = trace_redirects("https://example.com", &issuer, &TraceOptions::default()).await?;
//! println!(
//!     "{} hop(s), {} redirect(s), final destination {}",
//!     chain.steps.len(),
//!     chain.total_redirects,
//!     chain.final_url
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod server;
mod trace;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{HopErrorKind, InitializationError, TraceError};
pub use trace::{
    trace_redirects, HopResponse, RedirectChain, RedirectKind, RedirectStep, RequestIssuer,
    TraceOptions,
};
