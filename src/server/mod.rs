//! HTTP trace server.
//!
//! Exposes the tracer at `POST /api/trace`, accepting `{"url": "..."}` and
//! replying with the serialized chain. A pre-flight `OPTIONS` request
//! short-circuits with an empty 200; other methods get a 405. Every
//! response, errors included, carries permissive CORS headers.

mod handlers;
mod types;

use axum::routing::post;
use axum::Router;

use handlers::{method_not_allowed, preflight_handler, trace_handler};
pub use types::{ErrorResponse, ServerState, TraceRequest};

/// Builds the trace router over the given state.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/trace",
            post(trace_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Creates and starts the trace server.
pub async fn start_server(port: u16, state: ServerState) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind trace server to port {}: {}", port, e))?;

    log::info!("Trace server listening on http://127.0.0.1:{}/", port);
    log::info!("  - POST http://127.0.0.1:{}/api/trace", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Trace server error: {}", e))?;

    Ok(())
}
