// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared application state passed to every HTTP handler via axum's
//! `State` extractor.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::bus::{Bootstrap, Bus, Subscription};
use crate::config::Config;
use crate::event::{AgentStatus, BusEvent, Message};
use crate::formatter;
use crate::screen::Screen;
use crate::session::segmenter::Segmenter;
use crate::session::tracker::TickOutcome;

/// Process-scoped mutable state: the screen, the transcript, and the
/// current status. Everything else handlers need is immutable config.
pub struct Store {
    pub screen: RwLock<Screen>,
    segmenter: Mutex<Segmenter>,
    status: RwLock<AgentStatus>,
    pub bus: Bus,
    pub config: Arc<Config>,
    /// Bytes submitted here are written to the PTY master by the backend
    /// task. Cloned freely; the sender half is cheap and `Send + Sync`.
    pub input_tx: mpsc::Sender<Bytes>,
    pub shutdown: CancellationToken,
}

impl Store {
    pub fn new(config: Arc<Config>, input_tx: mpsc::Sender<Bytes>, shutdown: CancellationToken) -> Self {
        Self {
            screen: RwLock::new(Screen::new(config.cols, config.rows)),
            segmenter: Mutex::new(Segmenter::new()),
            status: RwLock::new(AgentStatus::Initializing),
            bus: Bus::new(),
            config,
            input_tx,
            shutdown,
        }
    }

    pub async fn status(&self) -> AgentStatus {
        *self.status.read().await
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.segmenter.lock().await.messages()
    }

    /// Apply a user submission: seal any open agent tail, append the user
    /// message, and publish it. Returns the appended message.
    pub async fn submit_user(&self, content: String) -> Message {
        let message = {
            let mut segmenter = self.segmenter.lock().await;
            segmenter.submit_user(content, now_ms())
        };
        self.bus.publish(BusEvent::MessageUpdate(message.clone()));
        message
    }

    /// Apply the Screen Tracker's per-tick outcome: publish a status change
    /// if the status moved, and — only when the tracker reports a newly
    /// stabilized snapshot — extract the agent's reply via the Agent
    /// Formatter and fold it into the transcript's open tail.
    pub async fn apply_tick(&self, outcome: TickOutcome) {
        if let Some(status) = outcome.status_change {
            *self.status.write().await = status;
            self.bus.publish(BusEvent::StatusChange(status));
        }

        if let Some(text) = outcome.stable_text {
            let agent_type = self.config.agent_type_enum().unwrap_or(crate::config::AgentType::Generic);
            let formatted = formatter::format_reply(&text, agent_type);
            let message = {
                let mut segmenter = self.segmenter.lock().await;
                segmenter.apply_stable_text(formatted, now_ms())
            };
            self.bus.publish(BusEvent::MessageUpdate(message));
        }
    }

    /// Register a new Event Bus subscriber, bootstrapped with the current
    /// transcript and status.
    pub async fn subscribe(&self) -> Subscription {
        let messages = self.messages().await;
        let status = self.status().await;
        self.bus.subscribe(Bootstrap { messages, status })
    }
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default()
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
