//! Application-level utilities for the CLI surface.

mod url;

pub use url::validate_and_normalize_url;
