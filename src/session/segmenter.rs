// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message Segmenter: reconstructs a conversational transcript from user
//! submissions and stable agent-screen text.
//!
//! Agent output between user turns is treated as a single evolving message
//! (id stable, content replaced) rather than an append-only log of
//! fragments, matching how a human reads a REPL reply as it streams in.

use uuid::Uuid;

use crate::event::{Message, Role};

pub struct Segmenter {
    sealed: Vec<Message>,
    open_tail: Option<Message>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self { sealed: Vec::new(), open_tail: None }
    }

    /// Append a new user message, sealing any open agent tail first.
    /// Returns the new message for the caller to publish.
    pub fn submit_user(&mut self, content: String, now_ms: u64) -> Message {
        self.seal_open_tail();
        let message = Message { id: Uuid::new_v4().to_string(), role: Role::User, content, time: now_ms };
        self.sealed.push(message.clone());
        message
    }

    /// Apply newly stable agent reply text. If an agent tail is already
    /// open, its content is replaced in place (id unchanged); otherwise a
    /// new open tail is created. Returns the resulting message for the
    /// caller to publish.
    pub fn apply_stable_text(&mut self, content: String, now_ms: u64) -> Message {
        match self.open_tail.as_mut() {
            Some(tail) => {
                tail.content = content;
                tail.time = now_ms;
                tail.clone()
            }
            None => {
                let message =
                    Message { id: Uuid::new_v4().to_string(), role: Role::Agent, content, time: now_ms };
                self.open_tail = Some(message.clone());
                message
            }
        }
    }

    fn seal_open_tail(&mut self) {
        if let Some(tail) = self.open_tail.take() {
            self.sealed.push(tail);
        }
    }

    /// Point-in-time snapshot of the full transcript in order, including
    /// the open tail if any.
    pub fn messages(&self) -> Vec<Message> {
        let mut all = self.sealed.clone();
        if let Some(tail) = &self.open_tail {
            all.push(tail.clone());
        }
        all
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "segmenter_tests.rs"]
mod tests;
