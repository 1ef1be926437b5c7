//! `GET /api/view` — latest panel state as JSON.

use axum::Json;
use axum::extract::State;

use mirrorpanel_domain::view::PanelState;

use crate::state::AppState;

/// Return the latest [`PanelState`].
///
/// Reading the state does not consume a pending alert; only the HTML page
/// does.
pub async fn get(State(state): State<AppState>) -> Json<PanelState> {
    Json(state.view.current())
}
