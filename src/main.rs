//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_tracer` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Dispatch to a one-shot trace or the HTTP trace server
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use redirect_tracer::app::validate_and_normalize_url;
use redirect_tracer::initialization::{init_client, init_logger_with};
use redirect_tracer::server::{start_server, ServerState};
use redirect_tracer::{trace_redirects, Config, RequestIssuer, TraceOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let issuer = Arc::new(RequestIssuer::new(client));
    let options = TraceOptions {
        max_hops: config.max_hops,
    };

    if config.serve {
        return start_server(config.port, ServerState { issuer, options }).await;
    }

    // clap guarantees a URL is present when --serve is absent
    let raw_url = config.url.unwrap_or_default();
    let Some(url) = validate_and_normalize_url(&raw_url) else {
        eprintln!("redirect_tracer error: invalid URL: {raw_url}");
        process::exit(1);
    };

    match trace_redirects(&url, &issuer, &options).await {
        Ok(chain) => {
            let json = serde_json::to_string_pretty(&chain)
                .context("Failed to serialize redirect chain")?;
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            eprintln!("redirect_tracer error: {e:#}");
            process::exit(1);
        }
    }
}
