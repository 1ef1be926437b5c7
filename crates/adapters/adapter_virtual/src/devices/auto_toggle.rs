//! Automatic toggle timer — fires once, some minutes after being armed.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use mirrorpanel_domain::delay::DelayMinutes;

/// A one-shot deadline, disarmed by default.
#[derive(Default)]
pub struct AutoToggle {
    deadline: Mutex<Option<Instant>>,
}

impl AutoToggle {
    /// Arm the timer to fire `delay` from now, replacing any pending deadline.
    pub fn arm(&self, delay: DelayMinutes) {
        let after = Duration::from_millis(delay.as_millis());
        *self.lock() = Some(Instant::now() + after);
    }

    /// Cancel the pending deadline, if any.
    pub fn disarm(&self) {
        *self.lock() = None;
    }

    /// Milliseconds left before the deadline, `None` when disarmed.
    #[must_use]
    pub fn remaining_millis(&self) -> Option<u64> {
        self.lock().map(|deadline| {
            let left = deadline.saturating_duration_since(Instant::now());
            u64::try_from(left.as_millis()).unwrap_or(u64::MAX)
        })
    }

    /// Consume the deadline if it has passed. Returns `true` exactly once
    /// per expiry.
    pub fn fire_if_due(&self) -> bool {
        let mut deadline = self.lock();
        match *deadline {
            Some(at) if at <= Instant::now() => {
                *deadline = None;
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.deadline.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
