// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP Surface: builds the axum `Router` wiring every endpoint to the
//! shared [`Store`], the bearer-token auth middleware, and structured
//! request logging.

pub mod auth;
pub mod http;
pub mod state;

pub use state::Store;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the axum `Router` with every route from §6 of the external
/// interface: status, messages, message submission, the SSE event stream,
/// and the unauthenticated health check.
///
/// Layers apply bottom-up: the auth middleware sees the request first (so
/// `/health` and raw `/message` submissions can be exempted before any
/// handler runs), and the trace layer wraps everything so every response —
/// including 401s — gets a structured log line.
pub fn build_router(state: Arc<Store>) -> Router {
    Router::new()
        .route("/status", get(http::status))
        .route("/messages", get(http::messages))
        .route("/message", post(http::message))
        .route("/events", get(http::events))
        .route("/health", get(http::health))
        .layer(middleware::from_fn_with_state(state.clone(), auth::auth_layer))
        .layer(
            TraceLayer::new_for_http().on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                    let status = response.status();
                    let latency_ms = latency.as_millis() as u64;
                    if status.is_client_error() || status.is_server_error() {
                        tracing::info!(status = status.as_u16(), latency_ms, "request completed");
                    } else {
                        tracing::debug!(status = status.as_u16(), latency_ms, "request completed");
                    }
                },
            ),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
