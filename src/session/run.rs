// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The core session loop: the PTY reader task feeds the Screen Emulator,
//! the ticker samples it and drives the Screen Tracker, and the whole
//! thing tears down on shutdown or child exit.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::pty::{Backend, ExitStatus};
use crate::transport::state::Store;

use super::tracker::Tracker;

/// Runtime objects needed to build and run a [`Session`] that are not
/// derivable from [`Config`] alone.
pub struct SessionConfig {
    pub backend: Box<dyn Backend>,
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub shutdown: CancellationToken,
}

pub struct Session {
    backend: Arc<dyn Backend>,
    config: Arc<Config>,
    store: Arc<Store>,
    shutdown: CancellationToken,
}

impl Session {
    pub fn new(session: SessionConfig) -> Self {
        let SessionConfig { backend, config, store, shutdown } = session;
        Self { backend: Arc::from(backend), config, store, shutdown }
    }

    /// Run until the backend child exits or shutdown completes. Returns the
    /// child's exit status.
    pub async fn run(self, input_rx: mpsc::Receiver<Bytes>) -> anyhow::Result<ExitStatus> {
        let Session { backend, config, store, shutdown } = self;

        if let Err(e) = backend.resize(config.cols, config.rows) {
            warn!("initial PTY resize failed: {e}");
        }

        let (output_tx, mut output_rx) = mpsc::channel::<Bytes>(256);
        let run_backend = Arc::clone(&backend);
        let mut run_handle = tokio::spawn(async move { run_backend.run(output_tx, input_rx).await });

        let mut tracker = Tracker::new(&config);
        let mut ticker = tokio::time::interval(config.sample_period());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let idle_timeout = config.idle_timeout();
        let mut last_activity = Instant::now();

        let mut closing = false;

        let exit_status = loop {
            tokio::select! {
                data = output_rx.recv() => {
                    if let Some(bytes) = data {
                        last_activity = Instant::now();
                        store.screen.write().await.feed(&bytes);
                    }
                    // `None` means the backend dropped its output sender;
                    // keep looping until `run_handle` resolves with the
                    // final exit status.
                }

                _ = ticker.tick() => {
                    let text = store.screen.read().await.snapshot().text;
                    let outcome = tracker.observe(text);
                    store.apply_tick(outcome).await;

                    if !closing && !idle_timeout.is_zero() && last_activity.elapsed() >= idle_timeout {
                        info!(?idle_timeout, "idle timeout elapsed, shutting down");
                        shutdown.cancel();
                    }
                }

                _ = shutdown.cancelled(), if !closing => {
                    closing = true;
                    info!("shutdown received, closing PTY child");
                    let grace = config.shutdown_grace();
                    let close_backend = Arc::clone(&backend);
                    tokio::task::spawn_blocking(move || {
                        if let Err(e) = close_backend.close(grace) {
                            warn!("error closing PTY backend: {e}");
                        }
                    });
                }

                result = &mut run_handle => {
                    let status = result.context("backend task panicked")??;
                    break status;
                }
            }
        };

        debug!(?exit_status, "PTY child exited");
        let outcome = tracker.mark_terminated();
        store.apply_tick(outcome).await;
        store.bus.close_all();

        Ok(exit_status)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
