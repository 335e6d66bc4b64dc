// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::event::AgentStatus;
use crate::transport::state::Store;

#[derive(Serialize)]
pub struct StatusResponse {
    status: AgentStatus,
}

/// `GET /status` — the agent's current activity classification.
pub async fn status(State(store): State<Arc<Store>>) -> impl IntoResponse {
    Json(StatusResponse { status: store.status().await })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
