//! Redirect-target resolution.
//!
//! Turns a `Location` header or an in-page redirect target plus the current
//! URL into an absolute next URL.

use url::Url;

use crate::error_handling::TraceError;

/// Resolves a redirect target against the URL it was served from.
///
/// Absolute targets are used as-is; protocol-relative (`//host/p`),
/// root-relative (`/p`) and path-relative (`p`) targets are resolved against
/// `base` per standard relative-URL semantics (`Url::join`). Hand-rolled
/// prefix concatenation is deliberately avoided — it mishandles trailing
/// slashes and query strings.
///
/// # Arguments
///
/// * `base` - The URL the redirect was served from
/// * `target` - The raw redirect target
///
/// # Errors
///
/// Returns `TraceError::InvalidRedirectTarget` if the result is not a
/// parseable absolute http(s) URL.
pub fn resolve(base: &Url, target: &str) -> Result<Url, TraceError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(TraceError::InvalidRedirectTarget(target.to_string()));
    }

    let resolved = Url::parse(target)
        .or_else(|_| base.join(target))
        .map_err(|_| TraceError::InvalidRedirectTarget(target.to_string()))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved),
        _ => Err(TraceError::InvalidRedirectTarget(target.to_string())),
    }
}
