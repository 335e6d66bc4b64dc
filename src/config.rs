// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use clap::Parser;

/// HTTP gateway that exposes a terminal-based coding agent as a long-lived service.
#[derive(Debug, Parser)]
#[command(name = "agentbridge", version, about)]
pub struct Config {
    /// HTTP port to listen on.
    #[arg(long, env = "AGENTBRIDGE_PORT", default_value = "8088")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "AGENTBRIDGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bearer token required on every endpoint except /health and raw input.
    /// When unset, every request is authorized.
    #[arg(long, env = "AGENTBRIDGE_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Agent type, used to select Agent Formatter rules (generic, claude).
    #[arg(long, env = "AGENTBRIDGE_AGENT_TYPE", default_value = "generic")]
    pub agent_type: String,

    /// Terminal columns.
    #[arg(long, env = "AGENTBRIDGE_COLS", default_value = "200")]
    pub cols: u16,

    /// Terminal rows.
    #[arg(long, env = "AGENTBRIDGE_ROWS", default_value = "50")]
    pub rows: u16,

    /// Screen sampling period in milliseconds.
    #[arg(long, env = "AGENTBRIDGE_SAMPLE_MS", default_value = "25")]
    pub sample_ms: u64,

    /// Stability window in milliseconds (consecutive identical samples
    /// required before the agent is classified `stable`).
    #[arg(long, env = "AGENTBRIDGE_STABILITY_MS", default_value = "250")]
    pub stability_ms: u64,

    /// Startup quiet window in milliseconds; samples taken before this
    /// elapses are always classified `initializing`.
    #[arg(long, env = "AGENTBRIDGE_STARTUP_QUIET_MS", default_value = "1000")]
    pub startup_quiet_ms: u64,

    /// Idle shutdown timeout in seconds (0 disables idle shutdown).
    #[arg(long, env = "AGENTBRIDGE_IDLE_TIMEOUT", default_value = "0")]
    pub idle_timeout_secs: u64,

    /// Grace period given to the PTY child between SIGINT and SIGKILL, and
    /// to background tasks during shutdown.
    #[arg(long, env = "AGENTBRIDGE_SHUTDOWN_GRACE", default_value = "10")]
    pub shutdown_grace_secs: u64,

    /// Log format (json or pretty).
    #[arg(long, env = "AGENTBRIDGE_LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "AGENTBRIDGE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Optional coordinator URL, read at startup and otherwise unused by
    /// the session core (registration itself is out of scope here).
    #[arg(long, env = "AGENTBRIDGE_COORDINATOR_URL")]
    pub coordinator_url: Option<String>,

    /// Agent command to run under the PTY (everything after `--`).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Agent types with distinct Agent Formatter rules (see `formatter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentType {
    Claude,
    Generic,
}

impl Config {
    /// Validate the configuration after parsing. Run once at startup,
    /// before anything is spawned.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.command.is_empty() {
            anyhow::bail!("a command to run under the PTY must be specified after `--`");
        }
        if self.cols == 0 || self.rows == 0 {
            anyhow::bail!("--cols and --rows must be non-zero");
        }
        self.agent_type_enum()?;
        Ok(())
    }

    pub fn agent_type_enum(&self) -> anyhow::Result<AgentType> {
        match self.agent_type.to_lowercase().as_str() {
            "claude" => Ok(AgentType::Claude),
            "generic" | "unknown" => Ok(AgentType::Generic),
            other => anyhow::bail!("invalid agent type: {other}"),
        }
    }

    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_ms)
    }

    pub fn stability_window(&self) -> Duration {
        Duration::from_millis(self.stability_ms)
    }

    pub fn startup_quiet_window(&self) -> Duration {
        Duration::from_millis(self.startup_quiet_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    /// Ring capacity for the Screen Tracker's sample history: enough
    /// samples to cover the stability window, plus a small margin.
    pub fn ring_capacity(&self) -> usize {
        let samples = self.stability_ms.div_ceil(self.sample_ms.max(1)) as usize;
        samples.max(1) + 2
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
