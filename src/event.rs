// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core data-model types shared by the Message Segmenter, Event Bus, and
//! HTTP surface: [`Message`], [`Role`], and [`AgentStatus`].

use serde::{Deserialize, Serialize};

/// Who produced a [`Message`].
///
/// `Raw` messages are internal keystrokes; they are written to the PTY but
/// never surfaced in the transcript or serialized over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    Raw,
}

/// One logical conversational turn, reconstructed from the snapshot stream
/// or submitted directly by a caller.
///
/// The id is stable across updates to the same turn: only the tail message
/// may be mutated in place, and a new id appears only when a new turn
/// begins (see `session::segmenter`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub time: u64,
}

/// Observable activity classification for the agent, published by the
/// Screen Tracker. Transitions are monotonic except that `Stable` and
/// `Changing` may oscillate; `Terminated` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Initializing,
    Stable,
    Changing,
    Terminated,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Stable => "stable",
            Self::Changing => "changing",
            Self::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events fanned out by the Event Bus to every subscriber.
///
/// Wire names match exactly: `message_update` and `status_change` (see
/// `transport::http::events`).
#[derive(Debug, Clone)]
pub enum BusEvent {
    MessageUpdate(Message),
    StatusChange(AgentStatus),
}

impl BusEvent {
    /// The SSE `event:` field name for this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MessageUpdate(_) => "message_update",
            Self::StatusChange(_) => "status_change",
        }
    }

    /// The SSE `data:` field payload, serialized as compact JSON.
    pub fn data_json(&self) -> String {
        match self {
            Self::MessageUpdate(m) => serde_json::to_string(m).unwrap_or_default(),
            Self::StatusChange(status) => {
                serde_json::to_string(&StatusChangePayload { status: *status }).unwrap_or_default()
            }
        }
    }
}

#[derive(Serialize)]
struct StatusChangePayload {
    status: AgentStatus,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
