// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::config::Config;

#[tokio::test]
async fn reports_initializing_for_a_freshly_built_store() {
    let config = Arc::new(Config::parse_from(["agentbridge", "--", "echo"]));
    let (input_tx, _input_rx) = mpsc::channel(8);
    let store = Arc::new(Store::new(config, input_tx, CancellationToken::new()));

    let response = status(State(store)).await.into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["status"], "initializing");
}
