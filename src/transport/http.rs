// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP request/response types and axum handler implementations, one
//! module per endpoint from the HTTP Surface's external interface.

mod events;
mod health;
mod message;
mod messages;
mod status;

pub use events::*;
pub use health::*;
pub use message::*;
pub use messages::*;
pub use status::*;
