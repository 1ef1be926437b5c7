//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api` and the control panel at `/`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use mirrorpanel_app::ports::PanelView;
    use mirrorpanel_app::runner::PollerHandle;
    use mirrorpanel_app::watch_view::WatchView;
    use mirrorpanel_domain::view::{DelayInputs, PanelState};
    use tower::ServiceExt;

    fn test_state() -> (AppState, Arc<WatchView>) {
        let view = Arc::new(WatchView::new());
        let (handle, _rx) = PollerHandle::channel(8);
        (AppState::new(handle, Arc::clone(&view)), view)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (state, _) = test_state();
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn should_serve_panel_page_at_root() {
        let (state, _) = test_state();
        let app = build(state.with_refresh_seconds(2));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let html = body_string(response).await;
        assert!(html.contains("Toggle went"));
        assert!(html.contains("http-equiv='refresh' content='2'"));
    }

    #[tokio::test]
    async fn should_serve_view_as_json() {
        let (state, view) = test_state();
        view.prefill(&DelayInputs {
            delay: Some(30),
            delay_by_lights: None,
        });
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/view")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: PanelState = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.inputs.delay, Some(30));
        assert!(body.view.is_none());
    }

    #[tokio::test]
    async fn should_not_accept_get_on_command_paths() {
        let (state, _) = test_state();
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/changeState")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
