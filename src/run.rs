// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level wiring: initialize logging, spawn the PTY child, build the
//! session core and HTTP surface, and run both to completion.
//!
//! Initialization order follows the session core's own dependency chain —
//! PTY → Store (which owns the Screen Emulator, Segmenter, Event Bus) →
//! HTTP — and teardown reverses it: shutdown cancels the snapshot loop and
//! the HTTP server before the PTY child is closed.

use std::sync::Arc;

use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::pty::spawn::NativePty;
use crate::pty::{Boxed, ExitStatus};
use crate::session::{Session, SessionConfig};
use crate::transport::{build_router, Store};

/// Outcome of a full run: how the PTY child ended.
pub struct RunResult {
    pub status: ExitStatus,
}

/// Initialize the global tracing subscriber from config. Uses `try_init`
/// so it is safe to call more than once (e.g. from tests).
pub fn init_tracing(config: &Config) {
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let result = match config.log_format.as_str() {
        "json" => fmt::fmt().with_env_filter(filter).json().try_init(),
        _ => fmt::fmt().with_env_filter(filter).try_init(),
    };
    drop(result);
}

/// Run one agent session to completion: spawn the PTY child, serve the
/// HTTP surface, and tear both down on shutdown or child exit.
pub async fn run(config: Config) -> anyhow::Result<RunResult> {
    init_tracing(&config);

    let config = Arc::new(config);
    let shutdown = CancellationToken::new();

    let backend = NativePty::spawn(&config.command, config.cols, config.rows)?.boxed();

    let (input_tx, input_rx) = mpsc::channel::<Bytes>(256);
    let store = Arc::new(Store::new(Arc::clone(&config), input_tx, shutdown.clone()));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP listening");

    let router = build_router(Arc::clone(&store));
    let server_shutdown = shutdown.clone();
    let server = tokio::spawn(async move {
        if let Err(e) =
            axum::serve(listener, router).with_graceful_shutdown(server_shutdown.cancelled_owned()).await
        {
            error!("HTTP server error: {e}");
        }
    });

    spawn_signal_handler(shutdown.clone());

    let session = Session::new(SessionConfig {
        backend,
        config: Arc::clone(&config),
        store: Arc::clone(&store),
        shutdown: shutdown.clone(),
    });
    let status = session.run(input_rx).await?;

    // The child may have exited on its own (not via a shutdown signal); make
    // sure the HTTP server and any other shutdown-gated tasks wind down too.
    shutdown.cancel();
    let _ = server.await;

    Ok(RunResult { status })
}

/// Cancel `shutdown` on the first SIGINT/SIGTERM; a second signal forces an
/// immediate exit rather than waiting out the graceful-shutdown grace period.
fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()).ok();
        let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt()).ok();

        tokio::select! {
            _ = recv_or_pending(&mut sigterm) => info!("received SIGTERM"),
            _ = recv_or_pending(&mut sigint) => info!("received SIGINT"),
        }
        shutdown.cancel();

        tokio::select! {
            _ = recv_or_pending(&mut sigterm) => {}
            _ = recv_or_pending(&mut sigint) => {}
        }
        info!("received second signal, forcing exit");
        std::process::exit(130);
    });
}

async fn recv_or_pending(signal: &mut Option<tokio::signal::unix::Signal>) {
    match signal {
        Some(s) => {
            s.recv().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
