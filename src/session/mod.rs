// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session orchestration: ties the PTY, Screen Emulator, Screen Tracker,
//! Message Segmenter, and Event Bus together into the running topology
//! described by the session core.

pub mod run;
pub mod segmenter;
pub mod tracker;

pub use run::Session;
