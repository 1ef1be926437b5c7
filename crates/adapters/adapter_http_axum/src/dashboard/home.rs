//! Dashboard home page — the control panel.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use mirrorpanel_domain::view::{ButtonView, LinkState, NOT_AVAILABLE, PanelState, SwitchState};

use crate::state::AppState;

/// Control panel template.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    refresh_seconds: u32,
    alert: Option<String>,
    went: String,
    light: String,
    toggle_in: String,
    lamp: ButtonView,
    heater: ButtonView,
    delay: String,
    delay_by_lights: String,
    link: LinkState,
}

impl PanelTemplate {
    /// Page for `panel`, with an optional one-shot alert.
    ///
    /// Before the first snapshot the readings show `null`, the countdown
    /// shows `N/A` and both buttons read as off.
    #[must_use]
    pub fn new(panel: PanelState, alert: Option<String>, refresh_seconds: u32) -> Self {
        let (went, light, toggle_in, lamp, heater) = match panel.view {
            Some(view) => (
                view.went_sensor,
                view.light_sensor,
                view.toggle_in,
                view.lamp,
                view.heater,
            ),
            None => (
                "null".to_string(),
                "null".to_string(),
                NOT_AVAILABLE.to_string(),
                off("Mirror Light"),
                off("Mirror Heater"),
            ),
        };
        let input = |value: Option<u32>| value.map(|minutes| minutes.to_string()).unwrap_or_default();
        Self {
            refresh_seconds,
            alert,
            went,
            light,
            toggle_in,
            lamp,
            heater,
            delay: input(panel.inputs.delay),
            delay_by_lights: input(panel.inputs.delay_by_lights),
            link: panel.link,
        }
    }
}

impl IntoResponse for PanelTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

fn off(name: &str) -> ButtonView {
    ButtonView {
        label: format!("{name}: {}", SwitchState::Off.label()),
        state: SwitchState::Off,
    }
}

/// `GET /` — render the panel.
///
/// A pending alert is consumed here, so it is shown exactly once.
pub async fn index(State(state): State<AppState>) -> PanelTemplate {
    let alert = state.view.take_alert();
    PanelTemplate::new(state.view.current(), alert, state.refresh_seconds)
}
