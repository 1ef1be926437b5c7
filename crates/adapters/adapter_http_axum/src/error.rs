//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mirrorpanel_domain::error::PanelError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PanelError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PanelError);

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PanelError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PanelError::Closed => {
                tracing::error!("poller is not running");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "poller is not running".to_string(),
                )
            }
            PanelError::Decode(_) | PanelError::Transport(_) => {
                tracing::error!(error = %self.0, "device error");
                (StatusCode::BAD_GATEWAY, "device unavailable".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
