//! JSON API handler modules.

pub mod sse;
pub mod view;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/view", get(view::get))
        .route("/view/stream", get(sse::stream))
}
