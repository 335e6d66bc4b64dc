// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap_or_default(), "\"user\"");
    assert_eq!(serde_json::to_string(&Role::Agent).unwrap_or_default(), "\"agent\"");
    assert_eq!(serde_json::to_string(&Role::Raw).unwrap_or_default(), "\"raw\"");
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(AgentStatus::Initializing.as_str(), "initializing");
    assert_eq!(AgentStatus::Stable.as_str(), "stable");
    assert_eq!(AgentStatus::Changing.as_str(), "changing");
    assert_eq!(AgentStatus::Terminated.as_str(), "terminated");
}

#[test]
fn message_update_event_shape() {
    let msg = Message { id: "m1".to_owned(), role: Role::Agent, content: "hi!".to_owned(), time: 42 };
    let event = BusEvent::MessageUpdate(msg.clone());
    assert_eq!(event.name(), "message_update");
    let json = event.data_json();
    assert!(json.contains("\"id\":\"m1\""));
    assert!(json.contains("\"content\":\"hi!\""));
    assert!(!json.contains("\"raw\""));
}

#[test]
fn status_change_event_shape() {
    let event = BusEvent::StatusChange(AgentStatus::Stable);
    assert_eq!(event.name(), "status_change");
    assert_eq!(event.data_json(), "{\"status\":\"stable\"}");
}
