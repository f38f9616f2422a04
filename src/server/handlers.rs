//! Trace server HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};

use crate::config::CORS_HEADERS;
use crate::error_handling::TraceError;
use crate::trace::trace_redirects;

use super::types::{ErrorResponse, ServerState, TraceRequest};

/// `POST /api/trace` — runs one trace and returns the chain.
pub async fn trace_handler(
    State(state): State<ServerState>,
    payload: Result<Json<TraceRequest>, JsonRejection>,
) -> Response {
    let url = match payload {
        Ok(Json(TraceRequest { url: Some(url) })) if !url.trim().is_empty() => url,
        _ => {
            return error_response(StatusCode::BAD_REQUEST, ErrorResponse::new("URL is required"));
        }
    };

    info!("Tracing redirects for {url}");

    match trace_redirects(&url, &state.issuer, &state.options).await {
        Ok(chain) => {
            info!(
                "Trace complete for {url}: {} step(s), {} redirect(s)",
                chain.steps.len(),
                chain.total_redirects
            );
            json_response(StatusCode::OK, &chain)
        }
        Err(TraceError::InvalidUrl(_)) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Invalid URL provided"),
        ),
        Err(e) => {
            error!("Trace failed for {url}: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_details("Failed to trace redirects", e.to_string()),
            )
        }
    }
}

/// `OPTIONS /api/trace` — CORS pre-flight short-circuit.
pub async fn preflight_handler() -> Response {
    with_cors((StatusCode::OK, "").into_response())
}

/// Any other method on the trace route.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorResponse::new("Method not allowed"),
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => with_cors(
            (status, [("content-type", "application/json")], json).into_response(),
        ),
        Err(e) => {
            error!("Failed to serialize response body: {e}");
            with_cors(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [("content-type", "application/json")],
                    r#"{"error":"Failed to trace redirects"}"#.to_string(),
                )
                    .into_response(),
            )
        }
    }
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    json_response(status, &body)
}

/// Attaches the permissive CORS headers every boundary response carries.
fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for &(name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}
