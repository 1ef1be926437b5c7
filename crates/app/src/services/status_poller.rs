//! Status poller — keeps the panel in sync with the device and relays commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use mirrorpanel_domain::command::{Command, DelayKind, ToggleTarget};
use mirrorpanel_domain::delay::{DELAY_ALERT, DelayMinutes};
use mirrorpanel_domain::error::PanelError;
use mirrorpanel_domain::sequence::SequenceGate;
use mirrorpanel_domain::snapshot::StatusSnapshot;
use mirrorpanel_domain::time::now;
use mirrorpanel_domain::view::{LinkState, PageView};

use crate::ports::{DeviceGateway, PanelView};

/// Application service driving one device and one view.
///
/// Every fetch is tagged by a [`SequenceGate`]; a snapshot is rendered only
/// if no newer one has been rendered already. There is no optimistic update:
/// toggles always re-fetch and render what the device reports.
pub struct StatusPoller<G, V> {
    gateway: G,
    view: V,
    gate: Mutex<SequenceGate>,
    link: Mutex<LinkState>,
    prefilled: AtomicBool,
    refresh_after_delay: bool,
}

impl<G, V> StatusPoller<G, V>
where
    G: DeviceGateway + Send + Sync,
    V: PanelView + Send + Sync,
{
    /// Create a poller reading from `gateway` and rendering into `view`.
    pub fn new(gateway: G, view: V) -> Self {
        Self {
            gateway,
            view,
            gate: Mutex::new(SequenceGate::new()),
            link: Mutex::new(LinkState::Unknown),
            prefilled: AtomicBool::new(false),
            refresh_after_delay: false,
        }
    }

    /// Also re-fetch the snapshot after a successful delay submission.
    ///
    /// Off by default: toggles re-fetch, delay submissions do not.
    #[must_use]
    pub fn with_refresh_after_delay(mut self, enabled: bool) -> Self {
        self.refresh_after_delay = enabled;
        self
    }

    /// Read one snapshot from the device.
    ///
    /// Failures are not retried. They are logged and reported to the view as
    /// a link-state change (only on transitions).
    ///
    /// # Errors
    ///
    /// Returns the gateway's transport or decode error.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_snapshot(&self) -> Result<StatusSnapshot, PanelError> {
        match self.gateway.fetch_snapshot().await {
            Ok(snapshot) => {
                self.observe_link(LinkState::Online);
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch device status");
                self.observe_link(LinkState::Offline);
                Err(err)
            }
        }
    }

    /// Render `snapshot` and push the result to the view.
    pub fn render(&self, snapshot: &StatusSnapshot) -> PageView {
        let view = PageView::render(snapshot, now());
        self.view.render(&view);
        view
    }

    /// Fetch the first snapshot, pre-fill the delay inputs from it, then render.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. Inputs are then pre-filled by the first
    /// successful [`refresh`](Self::refresh) instead.
    #[tracing::instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), PanelError> {
        let seq = self.lock_gate().issue();
        let snapshot = self.fetch_snapshot().await?;

        self.prefilled.store(true, Ordering::Release);
        self.view.prefill(&snapshot.delay_inputs());

        if self.lock_gate().accept(seq) {
            self.render(&snapshot);
        }
        Ok(())
    }

    /// One fetch-and-render cycle.
    ///
    /// Returns `Ok(false)` when the response was stale and discarded.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; nothing is rendered in that case.
    pub async fn refresh(&self) -> Result<bool, PanelError> {
        let seq = self.lock_gate().issue();
        let snapshot = self.fetch_snapshot().await?;

        if !self.lock_gate().accept(seq) {
            tracing::debug!(%seq, "discarding stale snapshot");
            return Ok(false);
        }
        if !self.prefilled.swap(true, Ordering::AcqRel) {
            self.view.prefill(&snapshot.delay_inputs());
        }
        self.render(&snapshot);
        Ok(true)
    }

    /// Send the toggle command for `target`, then re-fetch immediately.
    ///
    /// A failed command is logged and still followed by the re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the re-fetch error.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, target: ToggleTarget) -> Result<bool, PanelError> {
        if let Err(err) = self.gateway.send(Command::toggle(target)).await {
            tracing::warn!(error = %err, "toggle command failed");
        }
        self.refresh().await
    }

    /// Toggle the went output (`/changeState`).
    ///
    /// # Errors
    ///
    /// See [`toggle`](Self::toggle).
    pub async fn toggle_went(&self) -> Result<bool, PanelError> {
        self.toggle(ToggleTarget::Went).await
    }

    /// Toggle the mirror light (`/toggleMirrorLight`).
    ///
    /// # Errors
    ///
    /// See [`toggle`](Self::toggle).
    pub async fn toggle_light(&self) -> Result<bool, PanelError> {
        self.toggle(ToggleTarget::Light).await
    }

    /// Toggle the mirror heater (`/toggleMirrorHeater`).
    ///
    /// # Errors
    ///
    /// See [`toggle`](Self::toggle).
    pub async fn toggle_heater(&self) -> Result<bool, PanelError> {
        self.toggle(ToggleTarget::Heater).await
    }

    /// Validate `input` and store it into the `kind` delay setting.
    ///
    /// Invalid input raises the blocking alert on the view and sends nothing.
    /// Once the device took the value, the matching input shows it.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] for rejected input, or the
    /// gateway's error if the command could not be delivered.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self, kind: DelayKind, input: &str) -> Result<DelayMinutes, PanelError> {
        let minutes = match input.parse::<DelayMinutes>() {
            Ok(minutes) => minutes,
            Err(err) => {
                tracing::info!(error = %err, "rejected delay input");
                self.view.alert(DELAY_ALERT);
                return Err(err.into());
            }
        };

        self.gateway
            .send(Command::set_delay(kind, minutes))
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "delay command failed"))?;
        self.view.delay_stored(kind, minutes);

        if self.refresh_after_delay {
            // failure already logged by fetch_snapshot
            let _ = self.refresh().await;
        }
        Ok(minutes)
    }

    /// Submit the plain delay (`/setDelay`).
    ///
    /// # Errors
    ///
    /// See [`submit`](Self::submit).
    pub async fn submit_delay(&self, input: &str) -> Result<DelayMinutes, PanelError> {
        self.submit(DelayKind::Delay, input).await
    }

    /// Submit the delay counted from lights off (`/setDelayByLights`).
    ///
    /// # Errors
    ///
    /// See [`submit`](Self::submit).
    pub async fn submit_delay_by_lights(&self, input: &str) -> Result<DelayMinutes, PanelError> {
        self.submit(DelayKind::DelayByLights, input).await
    }

    /// Last observed device reachability.
    pub fn link_state(&self) -> LinkState {
        *self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observe_link(&self, link: LinkState) {
        let changed = {
            let mut current = self.link.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != link;
            *current = link;
            changed
        };
        if changed {
            tracing::info!(?link, "device link changed");
            self.view.link_changed(link);
        }
    }

    fn lock_gate(&self) -> MutexGuard<'_, SequenceGate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
