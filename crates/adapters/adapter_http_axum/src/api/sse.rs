//! Server-Sent Events (SSE) stream of panel state changes.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::state::AppState;

/// `GET /api/view/stream` — SSE stream of the panel state.
///
/// Sends the current state immediately, then one JSON-encoded `data:` frame
/// per change. Intermediate states are coalesced when the client is slow;
/// the latest one is always delivered.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let states = WatchStream::new(state.view.subscribe()).filter_map(|panel| {
        match Event::default().json_data(&panel) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize panel state for SSE stream");
                None
            }
        }
    });

    Sse::new(states).keep_alive(KeepAlive::default())
}
