// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::event::AgentStatus;
use crate::transport::state::Store;

/// `type` discriminator for `POST /message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    User,
    Raw,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SubmissionType,
}

#[derive(Serialize)]
pub struct MessageResponse {
    ok: bool,
}

/// `POST /message` — submit a user turn or write raw keystrokes to the PTY.
///
/// The body is parsed by hand rather than via the `Json` extractor so a
/// malformed body produces the shared `{"error": {...}}` envelope instead
/// of axum's default rejection text; this is also what lets the auth
/// middleware sniff `type` before this handler ever runs.
pub async fn message(State(store): State<Arc<Store>>, body: Bytes) -> Response {
    let req: MessageRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => return ErrorCode::BadRequest.to_http_response(format!("invalid body: {e}")).into_response(),
    };

    match req.kind {
        SubmissionType::Raw => write_pty(&store, req.content.into_bytes()).await,
        SubmissionType::User => {
            if req.content.is_empty() {
                return ErrorCode::BadRequest.to_http_response("content must not be empty").into_response();
            }
            submit_user(&store, req.content).await
        }
    }
}

/// Submission protocol for `type=user`: (a) verify not `terminated`
/// (rejecting `changing` too, per the resolved no-queueing contract), (b)
/// translate content into CR-terminated bytes, (c) append the user Message,
/// (d) write the bytes to the PTY.
async fn submit_user(store: &Store, content: String) -> Response {
    match store.status().await {
        AgentStatus::Terminated => {
            return ErrorCode::Terminated.to_http_response("agent has terminated").into_response()
        }
        AgentStatus::Changing => {
            return ErrorCode::Conflict
                .to_http_response("agent is currently producing output; retry after status is stable")
                .into_response()
        }
        AgentStatus::Initializing | AgentStatus::Stable => {}
    }

    let mut bytes = content.clone().into_bytes();
    bytes.push(b'\r');

    store.submit_user(content).await;
    write_pty(store, bytes).await
}

async fn write_pty(store: &Store, bytes: Vec<u8>) -> Response {
    if store.input_tx.send(Bytes::from(bytes)).await.is_err() {
        return ErrorCode::Terminated.to_http_response("agent process has exited").into_response();
    }
    Json(MessageResponse { ok: true }).into_response()
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
