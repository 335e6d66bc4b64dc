// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use clap::Parser;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::config::Config;
use crate::event::{AgentStatus, Role};

fn store() -> Arc<Store> {
    let config = Arc::new(Config::parse_from(["agentbridge", "--", "echo"]));
    let (input_tx, _input_rx) = mpsc::channel(8);
    Arc::new(Store::new(config, input_tx, CancellationToken::new()))
}

#[tokio::test]
async fn bootstrap_delivers_messages_before_status() {
    let store = store();
    store.submit_user("hi".to_owned()).await;

    let subscription = store.subscribe().await;
    let mut stream = Box::pin(bus_event_stream(subscription));

    match stream.next().await {
        Some(BusEvent::MessageUpdate(m)) => assert_eq!(m.content, "hi"),
        other => panic!("expected bootstrap message_update, got {other:?}"),
    }
    match stream.next().await {
        Some(BusEvent::StatusChange(status)) => assert_eq!(status, AgentStatus::Initializing),
        other => panic!("expected bootstrap status_change, got {other:?}"),
    }
}

#[tokio::test]
async fn live_events_follow_bootstrap() {
    let store = store();
    let subscription = store.subscribe().await;
    let mut stream = Box::pin(bus_event_stream(subscription));

    match stream.next().await {
        Some(BusEvent::StatusChange(AgentStatus::Initializing)) => {}
        other => panic!("expected bootstrap status_change, got {other:?}"),
    }

    store.submit_user("second".to_owned()).await;
    match stream.next().await {
        Some(BusEvent::MessageUpdate(m)) => {
            assert_eq!(m.role, Role::User);
            assert_eq!(m.content, "second");
        }
        other => panic!("expected live message_update, got {other:?}"),
    }
}
