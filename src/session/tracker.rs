// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Screen Tracker: samples the screen at regular intervals, classifies
//! agent activity, and reports which events (if any) should be published.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::event::AgentStatus;

/// What a single tick should cause the caller to publish, if anything.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Present when the sample text differs from the last one emitted.
    pub sample: Option<String>,
    /// Present when this tick's status is `Stable` and the stabilized text
    /// differs from the last one folded into the transcript. Unlike
    /// `sample`, this is keyed off the stable epoch rather than off every
    /// text change, so the caller can fold it into the Message Segmenter's
    /// open tail without re-deriving "are we stable" itself.
    pub stable_text: Option<String>,
    /// Present when the status differs from the previously reported one.
    pub status_change: Option<AgentStatus>,
    /// The status as of this tick, regardless of whether it changed.
    pub status: AgentStatus,
}

pub struct Tracker {
    ring: VecDeque<String>,
    capacity: usize,
    stability_samples: usize,
    started_at: Instant,
    startup_quiet: Duration,
    last_emitted_sample: Option<String>,
    last_folded_text: Option<String>,
    last_status: Option<AgentStatus>,
    terminated: bool,
}

impl Tracker {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Instant::now())
    }

    /// Construct with an explicit start instant, for deterministic tests of
    /// the startup-quiet-window boundary.
    pub fn with_clock(config: &Config, started_at: Instant) -> Self {
        let stability_samples =
            (config.stability_ms.div_ceil(config.sample_ms.max(1)) as usize).max(1);
        Self {
            ring: VecDeque::with_capacity(config.ring_capacity()),
            capacity: config.ring_capacity(),
            stability_samples,
            started_at,
            startup_quiet: config.startup_quiet_window(),
            last_emitted_sample: None,
            last_folded_text: None,
            last_status: None,
            terminated: false,
        }
    }

    /// Record a new sample and compute the resulting outcome.
    pub fn observe(&mut self, text: String) -> TickOutcome {
        self.push(text.clone());
        let status = self.classify();
        self.finish(Some(text), status)
    }

    /// Mark the child process as exited. Terminated is final: once set, all
    /// subsequent ticks keep reporting `Terminated`.
    pub fn mark_terminated(&mut self) -> TickOutcome {
        self.terminated = true;
        self.finish(None, AgentStatus::Terminated)
    }

    /// Clear sample history on resize. Status resets to `changing` until the
    /// stability window refills with samples at the new dimensions.
    pub fn reset_on_resize(&mut self) {
        self.ring.clear();
    }

    fn push(&mut self, text: String) {
        if self.ring.len() == self.capacity {
            self.ring.pop_front();
        }
        self.ring.push_back(text);
    }

    fn classify(&self) -> AgentStatus {
        if self.terminated {
            return AgentStatus::Terminated;
        }
        if self.started_at.elapsed() < self.startup_quiet {
            return AgentStatus::Initializing;
        }
        if self.ring.len() < self.stability_samples {
            return AgentStatus::Changing;
        }
        let window = self.ring.iter().rev().take(self.stability_samples);
        let mut window = window;
        let first = match window.next() {
            Some(s) => s,
            None => return AgentStatus::Changing,
        };
        if window.all(|s| s == first) {
            AgentStatus::Stable
        } else {
            AgentStatus::Changing
        }
    }

    fn finish(&mut self, text: Option<String>, status: AgentStatus) -> TickOutcome {
        let sample = match text.clone() {
            Some(t) if self.last_emitted_sample.as_deref() != Some(t.as_str()) => {
                self.last_emitted_sample = Some(t.clone());
                Some(t)
            }
            _ => None,
        };

        // Folded independently from `sample`: by the time the ring has gone
        // stable, the stabilizing text was already emitted (and deduped) as
        // a `sample` on an earlier, still-`Changing` tick, so gating on
        // `sample` here would never fire. Dedup instead against the last
        // text actually folded into the transcript.
        let stable_text = if status == AgentStatus::Stable {
            match text {
                Some(t) if self.last_folded_text.as_deref() != Some(t.as_str()) => {
                    self.last_folded_text = Some(t.clone());
                    Some(t)
                }
                _ => None,
            }
        } else {
            None
        };

        let status_change = if self.last_status != Some(status) {
            self.last_status = Some(status);
            Some(status)
        } else {
            None
        };

        TickOutcome { sample, stable_text, status_change, status }
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
