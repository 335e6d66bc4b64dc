// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::event::Message;
use crate::transport::state::Store;

#[derive(Serialize)]
pub struct MessagesResponse {
    messages: Vec<Message>,
}

/// `GET /messages` — a point-in-time snapshot of the transcript, excluding
/// raw keystrokes.
pub async fn messages(State(store): State<Arc<Store>>) -> impl IntoResponse {
    Json(MessagesResponse { messages: store.messages().await })
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
