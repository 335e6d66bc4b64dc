// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn msg(id: &str) -> Message {
    Message { id: id.to_owned(), role: crate::event::Role::Agent, content: "hi".to_owned(), time: 0 }
}

#[tokio::test]
async fn subscribe_bootstraps_existing_messages_then_status() {
    let bus = Bus::new();
    let mut sub = bus.subscribe(Bootstrap { messages: vec![msg("m1"), msg("m2")], status: AgentStatus::Stable });

    match sub.recv().await {
        Some(BusEvent::MessageUpdate(m)) => assert_eq!(m.id, "m1"),
        other => panic!("expected m1 message_update, got {other:?}"),
    }
    match sub.recv().await {
        Some(BusEvent::MessageUpdate(m)) => assert_eq!(m.id, "m2"),
        other => panic!("expected m2 message_update, got {other:?}"),
    }
    match sub.recv().await {
        Some(BusEvent::StatusChange(status)) => assert_eq!(status, AgentStatus::Stable),
        other => panic!("expected status_change, got {other:?}"),
    }
}

#[tokio::test]
async fn publish_reaches_all_subscribers_in_order() {
    let bus = Bus::new();
    let mut a = bus.subscribe(Bootstrap { messages: vec![], status: AgentStatus::Initializing });
    let mut b = bus.subscribe(Bootstrap { messages: vec![], status: AgentStatus::Initializing });

    // Drain each subscriber's bootstrap status_change first.
    a.recv().await;
    b.recv().await;

    bus.publish(BusEvent::MessageUpdate(msg("m1")));
    bus.publish(BusEvent::StatusChange(AgentStatus::Stable));

    match a.recv().await {
        Some(BusEvent::MessageUpdate(m)) => assert_eq!(m.id, "m1"),
        other => panic!("unexpected: {other:?}"),
    }
    match a.recv().await {
        Some(BusEvent::StatusChange(status)) => assert_eq!(status, AgentStatus::Stable),
        other => panic!("unexpected: {other:?}"),
    }
    match b.recv().await {
        Some(BusEvent::MessageUpdate(m)) => assert_eq!(m.id, "m1"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn unsubscribe_removes_from_registry() {
    let bus = Bus::new();
    let sub = bus.subscribe(Bootstrap { messages: vec![], status: AgentStatus::Initializing });
    assert_eq!(bus.subscriber_count(), 1);

    let id = sub.id();
    drop(sub);
    assert_eq!(bus.subscriber_count(), 0);

    // Idempotent: unsubscribing an already-gone id is a no-op, not an error.
    bus.unsubscribe(id);
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test]
async fn slow_subscriber_is_disconnected_not_allowed_to_block_others() {
    let bus = Bus::new();
    let mut slow = bus.subscribe(Bootstrap { messages: vec![], status: AgentStatus::Initializing });
    let mut fast = bus.subscribe(Bootstrap { messages: vec![], status: AgentStatus::Initializing });

    slow.recv().await;
    fast.recv().await;

    // Overflow the slow subscriber's bounded queue without ever draining it.
    for _ in 0..(QUEUE_CAPACITY + 10) {
        bus.publish(BusEvent::MessageUpdate(msg("m")));
    }

    assert_eq!(bus.subscriber_count(), 1, "overflowing subscriber should be disconnected");
    assert!(fast.recv().await.is_some(), "the remaining subscriber must still receive events");
}

#[tokio::test]
async fn close_all_drains_queued_events_then_ends_stream() {
    let bus = Bus::new();
    let mut sub = bus.subscribe(Bootstrap { messages: vec![], status: AgentStatus::Stable });
    sub.recv().await; // drain bootstrap status_change

    bus.publish(BusEvent::StatusChange(AgentStatus::Terminated));
    bus.close_all();

    match sub.recv().await {
        Some(BusEvent::StatusChange(status)) => assert_eq!(status, AgentStatus::Terminated),
        other => panic!("expected the queued terminated event first, got {other:?}"),
    }
    assert!(sub.recv().await.is_none(), "stream should end after the registry is cleared");
}

#[tokio::test]
async fn publish_with_no_subscribers_does_not_panic() {
    let bus = Bus::new();
    bus.publish(BusEvent::StatusChange(AgentStatus::Terminated));
    assert_eq!(bus.subscriber_count(), 0);
}
