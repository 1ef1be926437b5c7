//! Server-side rendered control panel (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod actions;
pub mod home;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the dashboard sub-router: the page and its form targets.
///
/// Form targets mirror the device's own command paths.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/changeState", post(actions::toggle_went))
        .route("/toggleMirrorLight", post(actions::toggle_light))
        .route("/toggleMirrorHeater", post(actions::toggle_heater))
        .route("/setDelay", post(actions::set_delay))
        .route("/setDelayByLights", post(actions::set_delay_by_lights))
}
