//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_SERVER_PORT, DEFAULT_USER_AGENT, HOP_TIMEOUT_SECS, MAX_REDIRECT_HOPS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and runtime configuration.
///
/// Run with a URL to trace it once and print the chain as JSON, or with
/// `--serve` to expose the tracer over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "redirect_tracer", about = "Trace HTTP and HTML redirect chains")]
pub struct Config {
    /// URL to trace (scheme may be omitted; https:// is assumed)
    #[arg(required_unless_present = "serve")]
    pub url: Option<String>,

    /// Run the HTTP trace server instead of a one-shot trace
    #[arg(long)]
    pub serve: bool,

    /// Port for the HTTP trace server
    #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Per-hop request timeout in seconds
    #[arg(long, default_value_t = HOP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum number of redirect hops to follow
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_hops: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            serve: false,
            port: DEFAULT_SERVER_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: HOP_TIMEOUT_SECS,
            max_hops: MAX_REDIRECT_HOPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
