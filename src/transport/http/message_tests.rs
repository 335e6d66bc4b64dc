// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::body::Bytes;
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::config::Config;
use crate::session::tracker::TickOutcome;

fn store() -> (Arc<Store>, mpsc::Receiver<Bytes>) {
    let config = Arc::new(Config::parse_from(["agentbridge", "--", "echo"]));
    let (input_tx, input_rx) = mpsc::channel(8);
    (Arc::new(Store::new(config, input_tx, CancellationToken::new())), input_rx)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn user_submission_appends_message_and_writes_cr_terminated_bytes() {
    let (store, mut input_rx) = store();
    let response =
        message(State(Arc::clone(&store)), Bytes::from(r#"{"content":"hello","type":"user"}"#)).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let messages = store.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "hello");

    let written = input_rx.recv().await.unwrap();
    assert_eq!(&written[..], b"hello\r");
}

#[tokio::test]
async fn raw_submission_writes_verbatim_bytes_and_does_not_touch_transcript() {
    let (store, mut input_rx) = store();
    // \u0003 is Ctrl-C; raw submissions carry literal control bytes and get
    // no CR appended, unlike user submissions.
    let response =
        message(State(Arc::clone(&store)), Bytes::from("{\"content\":\"\\u0003\",\"type\":\"raw\"}")).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    assert!(store.messages().await.is_empty());
    let written = input_rx.recv().await.unwrap();
    assert_eq!(&written[..], [0x03]);
}

#[tokio::test]
async fn empty_content_is_rejected_for_user_submissions() {
    let (store, _input_rx) = store();
    let response = message(State(store), Bytes::from(r#"{"content":"","type":"user"}"#)).await;
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (store, _input_rx) = store();
    let response = message(State(store), Bytes::from("not json")).await;
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_submission_conflicts_while_changing() {
    let (store, _input_rx) = store();
    store
        .apply_tick(TickOutcome {
            sample: None,
            stable_text: None,
            status_change: Some(AgentStatus::Changing),
            status: AgentStatus::Changing,
        })
        .await;

    let response = message(State(store), Bytes::from(r#"{"content":"hi","type":"user"}"#)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_submission_rejected_after_termination() {
    let (store, _input_rx) = store();
    store
        .apply_tick(TickOutcome {
            sample: None,
            stable_text: None,
            status_change: Some(AgentStatus::Terminated),
            status: AgentStatus::Terminated,
        })
        .await;

    let response = message(State(store), Bytes::from(r#"{"content":"hi","type":"user"}"#)).await;
    assert_eq!(response.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
}
