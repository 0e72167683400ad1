//! Doughda Admin library.
//!
//! This crate provides the admin console as a library, allowing the router
//! to be built and driven from integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the admin router with all routes and middleware attached.
///
/// Each call creates a fresh session store.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let secure = state.config().is_secure();

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        );

    let storage_config = &state.config().storage;
    if let Some(dir) = storage_config.local_upload_dir() {
        router = router.nest_service(&storage_config.upload_url_prefix, ServeDir::new(dir));
    } else if storage_config.serves_memory_uploads() {
        let path = format!("{}/{{name}}", storage_config.upload_url_prefix);
        router = router.route(&path, get(memory_upload));
    }

    router
        .layer(session_layer)
        .layer(axum::middleware::from_fn_with_state(
            secure,
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Serve an upload held by the in-memory asset store.
async fn memory_upload(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let url = format!("{}/{name}", state.config().storage.upload_url_prefix);
    match state.storage().assets().read(&url).await {
        Some((bytes, content_type)) => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the storage backend is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Storage ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
