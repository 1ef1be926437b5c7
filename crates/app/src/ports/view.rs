//! Panel view port — where rendered state goes.

use mirrorpanel_domain::command::DelayKind;
use mirrorpanel_domain::delay::DelayMinutes;
use mirrorpanel_domain::view::{DelayInputs, LinkState, PageView};

/// Receives everything the poller wants to show.
///
/// Calls are synchronous and must not block: implementations only store or
/// forward the value.
pub trait PanelView {
    /// Replace the displayed view.
    fn render(&self, view: &PageView);

    /// Pre-fill the delay inputs. Called once, before the first render.
    fn prefill(&self, inputs: &DelayInputs);

    /// The device accepted a new `kind` delay; show it in its input.
    fn delay_stored(&self, kind: DelayKind, minutes: DelayMinutes);

    /// Show a blocking alert to the user.
    fn alert(&self, message: &str);

    /// The device link went up or down.
    fn link_changed(&self, link: LinkState);
}

impl<T: PanelView> PanelView for std::sync::Arc<T> {
    fn render(&self, view: &PageView) {
        (**self).render(view);
    }

    fn prefill(&self, inputs: &DelayInputs) {
        (**self).prefill(inputs);
    }

    fn delay_stored(&self, kind: DelayKind, minutes: DelayMinutes) {
        (**self).delay_stored(kind, minutes);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn link_changed(&self, link: LinkState) {
        (**self).link_changed(link);
    }
}
