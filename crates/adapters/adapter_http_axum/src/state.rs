//! Shared application state for axum handlers.

use std::sync::Arc;

use mirrorpanel_app::runner::PollerHandle;
use mirrorpanel_app::watch_view::WatchView;

/// Default page auto-refresh period.
pub const DEFAULT_REFRESH_SECONDS: u32 = 1;

/// Application state shared across all axum handlers.
///
/// Handlers read the panel through `view` and act through `handle`; the
/// device itself is only ever reached by the poller.
#[derive(Clone)]
pub struct AppState {
    /// Queue feeding user actions to the poller.
    pub handle: PollerHandle,
    /// Latest panel state published by the poller.
    pub view: Arc<WatchView>,
    /// `<meta http-equiv="refresh">` period of the page, `0` to disable.
    pub refresh_seconds: u32,
}

impl AppState {
    /// Create a new application state refreshing the page every second.
    pub fn new(handle: PollerHandle, view: Arc<WatchView>) -> Self {
        Self {
            handle,
            view,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
        }
    }

    /// Override the page auto-refresh period.
    #[must_use]
    pub fn with_refresh_seconds(mut self, refresh_seconds: u32) -> Self {
        self.refresh_seconds = refresh_seconds;
        self
    }
}
