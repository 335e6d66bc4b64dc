// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PTY Process Supervisor: launches the agent under a pseudoterminal and
//! exposes a byte-stream read/write handle plus a graceful teardown.

pub mod nbio;
pub mod spawn;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;

/// How the child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

/// Terminal backend abstraction over a real PTY or a fake in-memory
/// implementation used in tests.
///
/// Object-safe for use as `Box<dyn Backend>`.
pub trait Backend: Send + Sync + 'static {
    /// Drive the backend's I/O loop: forward PTY output on `output_tx` and
    /// write bytes received on `input_rx` to the PTY, until the child exits
    /// or `input_rx` is closed (the latter is not itself treated as EOF —
    /// the loop keeps reading output until the child actually exits).
    ///
    /// Takes `&self` rather than `&mut self` so the backend can be shared
    /// (behind an `Arc`) with the caller that issues `resize`/`close` while
    /// this future is in flight.
    fn run(
        &self,
        output_tx: mpsc::Sender<Bytes>,
        input_rx: mpsc::Receiver<Bytes>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ExitStatus>> + Send + '_>>;

    /// Update the PTY window size.
    fn resize(&self, cols: u16, rows: u16) -> anyhow::Result<()>;

    /// Send SIGINT, wait up to `timeout` for the child to exit, then SIGKILL.
    fn close(&self, timeout: Duration) -> anyhow::Result<()>;

    fn child_pid(&self) -> Option<u32>;
}

/// Conversion trait so both concrete backends and `Box<dyn Backend>` can be
/// handed to session setup without explicit boxing.
pub trait Boxed {
    fn boxed(self) -> Box<dyn Backend>;
}

impl<T: Backend> Boxed for T {
    fn boxed(self) -> Box<dyn Backend> {
        Box::new(self)
    }
}

impl Boxed for Box<dyn Backend> {
    fn boxed(self) -> Box<dyn Backend> {
        self
    }
}
