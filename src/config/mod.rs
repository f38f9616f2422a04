//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (hop cap, timeouts, limits, etc.)
//! - HTTP header constants (navigation headers, CORS headers)
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel};
