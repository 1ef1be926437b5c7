//! End-to-end tests for the full mirrorpaneld stack.
//!
//! Each test wires the complete application (virtual mirror, real poller and
//! runner, watch view, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound. Time is paused, so
//! poll ticks happen as fast as the runtime goes idle.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mirrorpanel_adapter_http_axum::router;
use mirrorpanel_adapter_http_axum::state::AppState;
use mirrorpanel_adapter_virtual::VirtualMirror;
use mirrorpanel_app::runner::PollerRunner;
use mirrorpanel_app::services::status_poller::StatusPoller;
use mirrorpanel_app::watch_view::WatchView;
use mirrorpanel_domain::command::Command;
use mirrorpanel_domain::delay::{DELAY_ALERT, DelayMinutes};
use mirrorpanel_domain::view::{LinkState, PanelState, SwitchState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower::ServiceExt;

struct Stack {
    app: axum::Router,
    mirror: Arc<VirtualMirror>,
    shutdown: watch::Sender<bool>,
    poller: JoinHandle<()>,
}

impl Stack {
    async fn start() -> Self {
        let mirror = Arc::new(VirtualMirror::default());
        let view = Arc::new(WatchView::new());
        let poller = StatusPoller::new(Arc::clone(&mirror), Arc::clone(&view));
        let (runner, handle) = PollerRunner::new(Arc::new(poller), Duration::from_secs(1), 8);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let poller = tokio::spawn(runner.run(shutdown_rx));

        let stack = Self {
            app: router::build(AppState::new(handle, view)),
            mirror,
            shutdown,
            poller,
        };
        settle().await;
        stack
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Submit a form and return as soon as the response is in.
    async fn send_form(&self, uri: &str, form: &str) -> StatusCode {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    async fn post(&self, uri: &str, form: &str) -> StatusCode {
        let status = self.send_form(uri, form).await;
        settle().await;
        status
    }

    async fn panel(&self) -> PanelState {
        let (status, body) = self.get("/api/view").await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    async fn stop(self) {
        self.shutdown.send(true).unwrap();
        self.poller.await.unwrap();
    }
}

/// Let the runner drain its queue without reaching the next tick.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_return_ok_when_health_check_called() {
    let stack = Stack::start().await;

    let (status, body) = stack.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    stack.stop().await;
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_prefill_inputs_and_render_on_startup() {
    let stack = Stack::start().await;

    let panel = stack.panel().await;
    assert_eq!(panel.link, LinkState::Online);
    assert_eq!(panel.inputs.delay, Some(10));
    assert_eq!(panel.inputs.delay_by_lights, Some(5));
    let view = panel.view.unwrap();
    assert_eq!(view.light_sensor, "512");
    assert_eq!(view.toggle_in, "N/A");
    assert_eq!(view.heater.label, "Mirror Heater: Off");

    let (status, html) = stack.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<span id='lightSensorReading'>512</span>"));
    assert!(html.contains("placeholder='1-60' value='10'"));
    stack.stop().await;
}

// ---------------------------------------------------------------------------
// Toggles
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_toggle_heater_and_show_new_state_without_waiting_for_tick() {
    let stack = Stack::start().await;

    let status = stack.post("/toggleMirrorHeater", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    assert_eq!(stack.mirror.received(), vec![Command::ToggleHeater]);
    let heater = stack.panel().await.view.unwrap().heater;
    assert_eq!(heater.state, SwitchState::On);
    assert_eq!(heater.label, "Mirror Heater: On");
    stack.stop().await;
}

#[tokio::test(start_paused = true)]
async fn should_show_countdown_after_went_turned_on() {
    let stack = Stack::start().await;

    stack.post("/changeState", "").await;

    let view = stack.panel().await.view.unwrap();
    assert_eq!(view.went_sensor, "1");
    // ten minute default delay, re-fetched right after the toggle
    assert_eq!(view.toggle_in, "600");
    stack.stop().await;
}

// ---------------------------------------------------------------------------
// Delays
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_store_valid_delay_on_device() {
    let stack = Stack::start().await;

    let status = stack.post("/setDelay", "value=15").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let fifteen = DelayMinutes::try_from(15).unwrap();
    assert_eq!(stack.mirror.received(), vec![Command::SetDelay(fifteen)]);
    assert_eq!(stack.mirror.snapshot().delay_minutes, Some(15));
    assert_eq!(stack.panel().await.alert, None);
    stack.stop().await;
}

#[tokio::test(start_paused = true)]
async fn should_show_stored_delay_on_the_redirected_page() {
    let stack = Stack::start().await;

    let status = stack.send_form("/setDelay", "value=15").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, html) = stack.get("/").await;
    assert!(html.contains("id='delayInput' name='value' pattern='[0-9]*' inputmode='numeric' placeholder='1-60' value='15'"));
    assert!(html.contains("placeholder='1-60' value='5'"));
    stack.stop().await;
}

#[tokio::test(start_paused = true)]
async fn should_send_leading_zero_delay_as_typed() {
    let stack = Stack::start().await;

    stack.send_form("/setDelayByLights", "value=05").await;

    let received = stack.mirror.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].to_string(), "/setDelayByLights?value=05");
    assert_eq!(stack.mirror.snapshot().delay_by_lights_minutes, Some(5));
    stack.stop().await;
}

#[tokio::test(start_paused = true)]
async fn should_show_alert_on_the_page_right_after_invalid_delay() {
    let stack = Stack::start().await;

    stack.send_form("/setDelay", "value=abc").await;

    let (_, html) = stack.get("/").await;
    assert!(html.contains(DELAY_ALERT));
    assert!(stack.mirror.received().is_empty());
    stack.stop().await;
}

#[tokio::test(start_paused = true)]
async fn should_alert_once_and_send_nothing_for_invalid_delay() {
    let stack = Stack::start().await;

    for input in ["value=75", "value=abc", "value=0", "value=5.5", "value=-3"] {
        stack.post("/setDelayByLights", input).await;

        let (_, first) = stack.get("/").await;
        let (_, second) = stack.get("/").await;
        assert!(first.contains(DELAY_ALERT), "{input} should raise the alert");
        assert!(!second.contains(DELAY_ALERT), "alert should be shown once");
    }

    assert!(stack.mirror.received().is_empty());
    stack.stop().await;
}

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_pick_up_device_changes_on_next_tick() {
    let stack = Stack::start().await;

    stack.mirror.set_light_reading(42);
    assert_eq!(stack.panel().await.view.unwrap().light_sensor, "512");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(stack.panel().await.view.unwrap().light_sensor, "42");
    stack.stop().await;
}

#[tokio::test(start_paused = true)]
async fn should_report_offline_device_and_keep_last_view() {
    let stack = Stack::start().await;

    stack.mirror.set_online(false);
    tokio::time::sleep(Duration::from_secs(1)).await;

    let panel = stack.panel().await;
    assert_eq!(panel.link, LinkState::Offline);
    assert!(panel.view.is_some());
    let (_, html) = stack.get("/").await;
    assert!(html.contains("Mirror unreachable"));

    stack.mirror.set_online(true);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(stack.panel().await.link, LinkState::Online);
    stack.stop().await;
}
