//! Error handling: typed errors and hop-failure categorization.

mod categorization;
mod types;

pub use categorization::categorize_hop_error;
pub use types::{HopErrorKind, InitializationError, TraceError};
