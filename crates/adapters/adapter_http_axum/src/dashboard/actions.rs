//! Form targets of the control panel (POST + redirect).

use axum::extract::{Form, State};
use axum::response::Redirect;
use serde::Deserialize;

use mirrorpanel_domain::command::{DelayKind, ToggleTarget};
use mirrorpanel_domain::error::PanelError;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of the delay forms. The raw text is forwarded untouched; the poller
/// validates it.
#[derive(Debug, Deserialize)]
pub struct DelayForm {
    #[serde(default)]
    value: String,
}

async fn toggle(state: &AppState, target: ToggleTarget) -> Result<Redirect, ApiError> {
    state.handle.toggle(target).await?;
    Ok(Redirect::to("/"))
}

// Waits for the poller, so a rejection alert is pending before the redirect.
// Rejected input shows up on the page as the alert, device errors as the link.
async fn submit(state: &AppState, kind: DelayKind, form: DelayForm) -> Result<Redirect, ApiError> {
    if let Err(PanelError::Closed) = state.handle.submit_delay(kind, form.value).await {
        return Err(PanelError::Closed.into());
    }
    Ok(Redirect::to("/"))
}

/// `POST /changeState`
pub async fn toggle_went(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    toggle(&state, ToggleTarget::Went).await
}

/// `POST /toggleMirrorLight`
pub async fn toggle_light(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    toggle(&state, ToggleTarget::Light).await
}

/// `POST /toggleMirrorHeater`
pub async fn toggle_heater(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    toggle(&state, ToggleTarget::Heater).await
}

/// `POST /setDelay`
pub async fn set_delay(
    State(state): State<AppState>,
    Form(form): Form<DelayForm>,
) -> Result<Redirect, ApiError> {
    submit(&state, DelayKind::Delay, form).await
}

/// `POST /setDelayByLights`
pub async fn set_delay_by_lights(
    State(state): State<AppState>,
    Form(form): Form<DelayForm>,
) -> Result<Redirect, ApiError> {
    submit(&state, DelayKind::DelayByLights, form).await
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use mirrorpanel_app::runner::{PollerHandle, UserAction};
    use mirrorpanel_app::watch_view::WatchView;
    use mirrorpanel_domain::command::{DelayKind, ToggleTarget};
    use mirrorpanel_domain::delay::DelayMinutes;
    use mirrorpanel_domain::error::PanelError;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use crate::state::AppState;

    type Received = Arc<Mutex<Vec<(DelayKind, String)>>>;

    fn app() -> (axum::Router, mpsc::Receiver<UserAction>) {
        let (handle, rx) = PollerHandle::channel(8);
        let router = crate::router::build(AppState::new(handle, Arc::new(WatchView::new())));
        (router, rx)
    }

    /// Router whose submissions are answered by a stand-in poller.
    fn answering_app() -> (axum::Router, Received) {
        let (router, mut rx) = app();
        let received = Received::default();
        let seen = Arc::clone(&received);
        tokio::spawn(async move {
            while let Some(action) = rx.recv().await {
                if let UserAction::SubmitDelay { kind, input, reply } = action {
                    let outcome = input.parse::<DelayMinutes>().map_err(PanelError::from);
                    seen.lock().unwrap().push((kind, input));
                    let _ = reply.send(outcome);
                }
            }
        });
        (router, received)
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_queue_toggles_and_redirect_home() {
        for (uri, target) in [
            ("/changeState", ToggleTarget::Went),
            ("/toggleMirrorLight", ToggleTarget::Light),
            ("/toggleMirrorHeater", ToggleTarget::Heater),
        ] {
            let (app, mut rx) = app();
            let response = app.oneshot(post(uri, "")).await.unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
            assert!(matches!(
                rx.try_recv().unwrap(),
                UserAction::Toggle(queued) if queued == target
            ));
        }
    }

    #[tokio::test]
    async fn should_forward_raw_delay_input_and_redirect_once_handled() {
        let (app, received) = answering_app();
        let response = app
            .oneshot(post("/setDelayByLights", "value=abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        assert_eq!(
            *received.lock().unwrap(),
            vec![(DelayKind::DelayByLights, "abc".to_string())]
        );
    }

    #[tokio::test]
    async fn should_treat_missing_value_as_empty_input() {
        let (app, received) = answering_app();
        let response = app.oneshot(post("/setDelay", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            *received.lock().unwrap(),
            vec![(DelayKind::Delay, String::new())]
        );
    }

    #[tokio::test]
    async fn should_answer_service_unavailable_when_poller_stopped() {
        for (uri, body) in [("/changeState", ""), ("/setDelay", "value=5")] {
            let (app, rx) = app();
            drop(rx);

            let response = app.oneshot(post(uri, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}
