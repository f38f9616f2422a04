//! Chain driving.
//!
//! The bounded loop that issues hop requests, classifies each response,
//! consults the resolver and scanner, detects cycles, and accumulates steps
//! until the chain terminates.

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, warn};
use url::Url;

use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::{categorize_hop_error, HopErrorKind, TraceError};
use crate::trace::issuer::RequestIssuer;
use crate::trace::types::{RedirectChain, RedirectKind, RedirectStep};
use crate::trace::{resolver, scanner};

/// Per-trace options.
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Maximum number of hops to follow before giving up.
    pub max_hops: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        TraceOptions {
            max_hops: MAX_REDIRECT_HOPS,
        }
    }
}

/// Traces the redirect chain starting from `initial_url`.
///
/// Each iteration requests the current URL without following redirects,
/// records the hop, and advances to the next target: a resolved `Location`
/// header for 3xx responses, or an in-page redirect found by the scanner
/// for 2xx HTML responses. The loop stops on a non-redirecting response, a
/// hop failure (recorded as a terminal step with status 0), a revisited
/// URL, or the hop cap. Reaching the cap is not an error — the chain is
/// returned as collected, its last step still tagged as a redirect.
///
/// All mutable trace state (steps, visited set) is owned by this call, so
/// concurrent traces over a shared issuer are independent.
///
/// # Errors
///
/// Returns `TraceError::InvalidUrl` if `initial_url` is not an absolute
/// http(s) URL. Hop-level failures never surface here.
pub async fn trace_redirects(
    initial_url: &str,
    issuer: &RequestIssuer,
    options: &TraceOptions,
) -> Result<RedirectChain, TraceError> {
    let initial = parse_initial_url(initial_url)?;
    let max_hops = options.max_hops.max(1);

    let mut steps: Vec<RedirectStep> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = initial;

    for _ in 0..max_hops {
        if !visited.insert(current.as_str().to_string()) {
            debug!("Circular redirect detected at {current}, stopping");
            break;
        }

        let started = Instant::now();
        let response = match issuer.probe(&current).await {
            Ok(response) => response,
            Err(e) => {
                let kind = categorize_hop_error(&e);
                warn!("Hop request failed for {current}: {kind} ({e})");
                steps.push(failure_step(&current, kind, elapsed_ms(started)));
                break;
            }
        };

        let mut step = RedirectStep {
            url: current.as_str().to_string(),
            status_code: response.status_code,
            status_text: response.status_text.clone(),
            headers: response.headers.clone(),
            response_time: 0,
            redirect_type: None,
            redirect_delay: None,
        };

        if response.is_redirect() {
            let Some(location) = response.location() else {
                warn!(
                    "Redirect status {} for {current} but no Location header",
                    response.status_code
                );
                step.response_time = elapsed_ms(started);
                steps.push(step);
                break;
            };

            match resolver::resolve(&current, location) {
                Ok(next) => {
                    debug!("{current} -> {next} (HTTP {})", response.status_code);
                    step.tag(RedirectKind::Http(response.status_code));
                    step.response_time = elapsed_ms(started);
                    steps.push(step);
                    current = next;
                    continue;
                }
                Err(e) => {
                    warn!("Stopping trace at {current}: {e}");
                    step.response_time = elapsed_ms(started);
                    steps.push(step);
                    break;
                }
            }
        }

        if response.is_success() && response.is_html() {
            let hint = match issuer.fetch_body(&current).await {
                Ok(body) => scanner::scan(&body, &current),
                Err(e) => {
                    debug!("Body fetch failed for {current}, skipping redirect scan: {e}");
                    None
                }
            };

            // Hop time includes the body fetch and scan
            step.response_time = elapsed_ms(started);

            if let Some(hint) = hint {
                debug!("{current} -> {} ({})", hint.target, hint.kind);
                step.tag(hint.kind);
                steps.push(step);
                current = hint.target;
                continue;
            }

            steps.push(step);
            break;
        }

        step.response_time = elapsed_ms(started);
        steps.push(step);
        break;
    }

    Ok(RedirectChain::from_steps(
        steps,
        current.as_str().to_string(),
    ))
}

fn parse_initial_url(initial_url: &str) -> Result<Url, TraceError> {
    let url = Url::parse(initial_url)
        .map_err(|_| TraceError::InvalidUrl(initial_url.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(TraceError::InvalidUrl(initial_url.to_string())),
    }
}

fn failure_step(url: &Url, kind: HopErrorKind, response_time: u64) -> RedirectStep {
    RedirectStep {
        url: url.as_str().to_string(),
        status_code: 0,
        status_text: kind.as_str().to_string(),
        headers: Default::default(),
        response_time,
        redirect_type: None,
        redirect_delay: None,
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
