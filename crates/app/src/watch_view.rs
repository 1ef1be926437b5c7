//! In-process panel view backed by a tokio [`watch`] channel.

use tokio::sync::watch;

use mirrorpanel_domain::command::DelayKind;
use mirrorpanel_domain::delay::DelayMinutes;
use mirrorpanel_domain::view::{DelayInputs, LinkState, PageView, PanelState};

use crate::ports::PanelView;

/// [`PanelView`] that keeps the latest [`PanelState`] and notifies
/// subscribers of every change.
///
/// Updates succeed even when nobody is subscribed.
pub struct WatchView {
    sender: watch::Sender<PanelState>,
}

impl Default for WatchView {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchView {
    /// Create a view holding an empty state.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(PanelState::default());
        Self { sender }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.sender.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn current(&self) -> PanelState {
        self.sender.borrow().clone()
    }

    /// Remove and return the pending alert, so it is shown only once.
    pub fn take_alert(&self) -> Option<String> {
        let mut taken = None;
        self.sender.send_if_modified(|state| {
            taken = state.alert.take();
            taken.is_some()
        });
        taken
    }
}

impl PanelView for WatchView {
    fn render(&self, view: &PageView) {
        self.sender
            .send_modify(|state| state.view = Some(view.clone()));
    }

    fn prefill(&self, inputs: &DelayInputs) {
        self.sender.send_modify(|state| state.inputs = *inputs);
    }

    fn delay_stored(&self, kind: DelayKind, minutes: DelayMinutes) {
        let value = Some(u32::from(minutes));
        self.sender.send_modify(|state| match kind {
            DelayKind::Delay => state.inputs.delay = value,
            DelayKind::DelayByLights => state.inputs.delay_by_lights = value,
        });
    }

    fn alert(&self, message: &str) {
        self.sender
            .send_modify(|state| state.alert = Some(message.to_string()));
    }

    fn link_changed(&self, link: LinkState) {
        self.sender.send_modify(|state| state.link = link);
    }
}
