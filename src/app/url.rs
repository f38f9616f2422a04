//! URL validation and normalization utilities.

use log::warn;

/// Maximum URL length (2048 characters), matching common browser and server
/// limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a user-supplied URL.
///
/// Adds an https:// prefix if the scheme is missing, then validates that the
/// URL is syntactically valid and uses an http/https scheme. Rejects URLs
/// longer than `MAX_URL_LENGTH`. Logs a warning and returns None if the URL
/// is invalid, too long, or uses an unsupported scheme.
///
/// Used by the CLI so `redirect_tracer example.com` works; the HTTP boundary
/// requires a fully-qualified URL and does not normalize.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() || url.len() > MAX_URL_LENGTH {
        warn!("Skipping empty or over-long URL input");
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!("Skipping URL exceeding maximum length after normalization");
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(normalized),
            _ => {
                warn!("Skipping unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    #[test]
    fn test_adds_https_prefix() {
        assert_eq!(
            validate_and_normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_preserves_existing_scheme() {
        assert_eq!(
            validate_and_normalize_url("http://example.com"),
            Some("http://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_preserves_path_and_query() {
        assert_eq!(
            validate_and_normalize_url("example.com/path?query=value"),
            Some("https://example.com/path?query=value".to_string())
        );
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(validate_and_normalize_url("not a valid url!!!"), None);
        assert_eq!(validate_and_normalize_url(""), None);
        assert_eq!(validate_and_normalize_url("   "), None);
    }

    #[test]
    fn test_rejects_over_long_url() {
        let long_url = format!("https://example.com/{}", "a".repeat(2100));
        assert_eq!(validate_and_normalize_url(&long_url), None);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_normalization_idempotent(url in "[a-z]{3,20}\\.[a-z]{2,5}") {
            if let Some(n1) = validate_and_normalize_url(&url) {
                prop_assert_eq!(
                    Some(n1.clone()),
                    validate_and_normalize_url(&n1),
                    "normalizing twice should produce the same result"
                );
            }
        }

        #[test]
        fn test_scheme_handling(domain in "[a-z]{3,20}\\.[a-z]{2,5}") {
            let no_scheme = validate_and_normalize_url(&domain);
            prop_assert!(no_scheme.is_some());
            prop_assert!(no_scheme.unwrap().starts_with("https://"));

            let http_url = format!("http://{}", domain);
            let with_http = validate_and_normalize_url(&http_url);
            prop_assert!(with_http.is_some());
            prop_assert!(with_http.unwrap().starts_with("http://"));
        }

        #[test]
        fn test_special_chars_no_panic(input in ".{0,200}") {
            let _ = validate_and_normalize_url(&input);
        }
    }
}
