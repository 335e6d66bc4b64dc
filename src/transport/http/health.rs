// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    ok: bool,
}

/// `GET /health` — liveness probe. Unauthenticated; never fails.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { ok: true })
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
