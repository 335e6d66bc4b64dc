// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::Stream;
use futures_util::StreamExt;

use crate::bus::Subscription;
use crate::event::BusEvent;
use crate::transport::state::Store;

/// `GET /events` — subscribe to the Event Bus over Server-Sent Events.
///
/// Every connection gets its own [`Subscription`], bootstrapped with the
/// current transcript and status before any live event; `Subscription`'s
/// `Drop` unregisters it from the bus when the client disconnects.
pub async fn events(
    State(store): State<Arc<Store>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = bus_event_stream(store.subscribe().await).map(|event| Ok(to_sse_event(&event)));
    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("keep-alive"))
}

/// The raw `BusEvent` stream behind `/events`, factored out so tests can
/// assert on ordering and content without going through SSE wire framing.
fn bus_event_stream(subscription: Subscription) -> impl Stream<Item = BusEvent> {
    futures_util::stream::unfold(subscription, |mut sub| async move {
        let event = sub.recv().await?;
        Some((event, sub))
    })
}

fn to_sse_event(event: &BusEvent) -> Event {
    Event::default().event(event.name()).data(event.data_json())
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
