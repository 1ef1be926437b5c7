//! Poller event loop — one task, one subscription per event source.
//!
//! The runner owns the poll timer, the queue of user actions, and the
//! shutdown signal. Timer ticks and user actions are handled one at a time
//! on the same task, so the poller never races itself for timer-driven work.
//! UI adapters hold a cloneable [`PollerHandle`] and never talk to the
//! device directly. Delay submissions carry a reply channel, so the caller
//! learns the outcome (and any alert is already on the view) before it
//! answers the user.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};

use mirrorpanel_domain::command::{DelayKind, ToggleTarget};
use mirrorpanel_domain::delay::DelayMinutes;
use mirrorpanel_domain::error::PanelError;

use crate::ports::{DeviceGateway, PanelView};
use crate::services::status_poller::StatusPoller;

/// Something the user asked for.
#[derive(Debug)]
pub enum UserAction {
    Toggle(ToggleTarget),
    SubmitDelay {
        kind: DelayKind,
        input: String,
        reply: oneshot::Sender<Result<DelayMinutes, PanelError>>,
    },
}

/// Sending side of the runner's action queue.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    actions: mpsc::Sender<UserAction>,
}

impl PollerHandle {
    /// Create a handle and the receiving end of its queue.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<UserAction>) {
        let (actions, rx) = mpsc::channel(capacity);
        (Self { actions }, rx)
    }

    /// Enqueue an action.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Closed`] once the runner has stopped.
    pub async fn dispatch(&self, action: UserAction) -> Result<(), PanelError> {
        self.actions
            .send(action)
            .await
            .map_err(|_| PanelError::Closed)
    }

    /// Enqueue a toggle.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Closed`] once the runner has stopped.
    pub async fn toggle(&self, target: ToggleTarget) -> Result<(), PanelError> {
        self.dispatch(UserAction::Toggle(target)).await
    }

    /// Submit a raw delay input and wait until the poller has handled it.
    ///
    /// Validation happens in the poller; a rejected input has already raised
    /// the alert on the view when this returns.
    ///
    /// # Errors
    ///
    /// Returns the poller's [`submit`](StatusPoller::submit) error, or
    /// [`PanelError::Closed`] once the runner has stopped.
    pub async fn submit_delay(
        &self,
        kind: DelayKind,
        input: impl Into<String>,
    ) -> Result<DelayMinutes, PanelError> {
        let (reply, outcome) = oneshot::channel();
        self.dispatch(UserAction::SubmitDelay {
            kind,
            input: input.into(),
            reply,
        })
        .await?;
        outcome.await.map_err(|_| PanelError::Closed)?
    }
}

/// The poller's event loop.
pub struct PollerRunner<G, V> {
    poller: Arc<StatusPoller<G, V>>,
    interval: Duration,
    actions: mpsc::Receiver<UserAction>,
}

impl<G, V> PollerRunner<G, V>
where
    G: DeviceGateway + Send + Sync,
    V: PanelView + Send + Sync,
{
    /// Create a runner polling every `interval`, and the handle feeding it.
    pub fn new(
        poller: Arc<StatusPoller<G, V>>,
        interval: Duration,
        capacity: usize,
    ) -> (Self, PollerHandle) {
        let (handle, actions) = PollerHandle::channel(capacity);
        let runner = Self {
            poller,
            interval,
            actions,
        };
        (runner, handle)
    }

    /// Initialize, then loop until `shutdown` flips to `true` or its sender
    /// is dropped.
    ///
    /// Each tick runs exactly one fetch-and-render cycle. Ticks missed while
    /// a slow cycle was running are skipped rather than replayed in a burst.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        if *shutdown.borrow() {
            return;
        }
        tracing::info!(interval = ?self.interval, "poller started");

        // failure already logged; inputs get pre-filled by the first good refresh
        let _ = self.poller.initialize().await;

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let _ = self.poller.refresh().await;
                }
                Some(action) = self.actions.recv() => {
                    self.handle(action).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("poller stopped");
    }

    async fn handle(&self, action: UserAction) {
        tracing::debug!(?action, "handling user action");
        match action {
            UserAction::Toggle(target) => {
                let _ = self.poller.toggle(target).await;
            }
            UserAction::SubmitDelay { kind, input, reply } => {
                let outcome = self.poller.submit(kind, &input).await;
                // the submitter may have given up waiting
                let _ = reply.send(outcome);
            }
        }
    }
}
