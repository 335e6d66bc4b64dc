// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ErrorCode;
use crate::transport::state::Store;

/// Body size above which a `POST /message` request is rejected before the
/// raw/user sniff even runs.
const MAX_MESSAGE_BODY_BYTES: usize = 64 * 1024;

/// Constant-time string comparison to prevent timing side-channel attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        acc |= x ^ y;
    }
    acc == 0
}

/// Validate a Bearer token from HTTP headers.
///
/// Returns `Ok(())` when `expected` is `None` (auth disabled) or when the
/// header matches. Returns `Err(ErrorCode::Unauthorized)` otherwise.
pub fn validate_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ErrorCode> {
    let expected = match expected {
        Some(tok) => tok,
        None => return Ok(()),
    };

    let header = headers.get("authorization").and_then(|v| v.to_str().ok()).ok_or(ErrorCode::Unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or(ErrorCode::Unauthorized)?;
    if constant_time_eq(token, expected) {
        Ok(())
    } else {
        Err(ErrorCode::Unauthorized)
    }
}

/// `true` if the body's top-level `type` field is the JSON string `"raw"`.
/// Any parse failure is treated as not-raw, so a malformed body still flows
/// through to the handler, which rejects it with a proper 400.
fn is_raw_submission(body: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("type").and_then(|t| t.as_str().map(|s| s == "raw")))
        .unwrap_or(false)
}

fn unauthorized(code: ErrorCode) -> Response {
    code.to_http_response("unauthorized").into_response()
}

/// Axum middleware enforcing Bearer token auth on every route except
/// `/health` and `POST /message` bodies whose `type` is `raw`.
///
/// The raw exemption requires peeking at the body, so this middleware
/// buffers it and reattaches an identical body before forwarding the
/// request — handlers never observe the difference.
pub async fn auth_layer(State(store): State<Arc<Store>>, req: Request<Body>, next: Next) -> Response {
    if req.uri().path() == "/health" {
        return next.run(req).await;
    }

    let expected = store.config.auth_token.as_deref();

    if req.uri().path() == "/message" && req.method() == Method::POST {
        let (parts, body) = req.into_parts();
        let bytes = match to_bytes(body, MAX_MESSAGE_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(_) => return ErrorCode::BadRequest.to_http_response("body too large or unreadable").into_response(),
        };
        let exempt = is_raw_submission(&bytes);
        let req = Request::from_parts(parts, Body::from(bytes));

        if exempt {
            return next.run(req).await;
        }
        return match validate_bearer(req.headers(), expected) {
            Ok(()) => next.run(req).await,
            Err(code) => unauthorized(code),
        };
    }

    match validate_bearer(req.headers(), expected) {
        Ok(()) => next.run(req).await,
        Err(code) => unauthorized(code),
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
