//! Virtual relay — an on/off output.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A simulated relay, off by default.
#[derive(Default)]
pub struct VirtualRelay {
    on: Mutex<bool>,
}

impl VirtualRelay {
    /// Current state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        *self.lock()
    }

    /// Flip the relay, returning the new state.
    pub fn toggle(&self) -> bool {
        let mut on = self.lock();
        *on = !*on;
        *on
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.on.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
