// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use clap::Parser;

use super::*;
use crate::config::Config;

#[tokio::test]
async fn run_completes_when_child_exits_on_its_own() -> anyhow::Result<()> {
    // Port 0 binds an ephemeral port so this test never collides with a
    // real server or with other tests running concurrently.
    let config = Config::parse_from([
        "agentbridge",
        "--port",
        "0",
        "--cols",
        "40",
        "--rows",
        "10",
        "--",
        "true",
    ]);

    let result = tokio::time::timeout(Duration::from_secs(5), run(config)).await??;
    assert_eq!(result.status.code, Some(0));
    Ok(())
}
