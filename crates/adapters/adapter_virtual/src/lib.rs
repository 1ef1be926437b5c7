//! # mirrorpanel-adapter-virtual
//!
//! Virtual/demo device that answers the mirror endpoints in memory, for
//! testing and demonstration without the real hardware.
//!
//! ## Simulated behaviour
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/changeState` | Flips the went output. Turning it on arms the automatic toggle for `delay` minutes; turning it off disarms it. |
//! | `/toggleMirrorLight` | Flips the lamp. Turning the lamp off while the went output is on re-arms the automatic toggle for `delayByLights` minutes. |
//! | `/toggleMirrorHeater` | Flips the heater. |
//! | `/setDelay`, `/setDelayByLights` | Store the value. |
//!
//! When the automatic toggle fires, the went output flips. The went sensor
//! reads `1`/`0` from the went output; the light sensor reads a settable
//! value.
//!
//! ## Dependency rule
//!
//! Depends on `mirrorpanel-app` (port traits) and `mirrorpanel-domain` only.

mod devices;
pub mod error;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use mirrorpanel_app::ports::DeviceGateway;
use mirrorpanel_domain::command::Command;
use mirrorpanel_domain::delay::DelayMinutes;
use mirrorpanel_domain::error::PanelError;
use mirrorpanel_domain::snapshot::StatusSnapshot;

use devices::{AutoToggle, VirtualRelay};
use error::VirtualError;

const DEFAULT_LIGHT_READING: u32 = 512;
/// How many of the latest commands [`VirtualMirror::received`] keeps.
pub const RECEIVED_CAPACITY: usize = 64;

#[derive(Clone, Copy)]
struct Delays {
    delay: DelayMinutes,
    by_lights: DelayMinutes,
}

/// Simulated mirror device.
pub struct VirtualMirror {
    went: VirtualRelay,
    lamp: VirtualRelay,
    heater: VirtualRelay,
    auto_toggle: AutoToggle,
    delays: Mutex<Delays>,
    light_reading: AtomicU32,
    online: AtomicBool,
    received: Mutex<VecDeque<Command>>,
}

impl Default for VirtualMirror {
    fn default() -> Self {
        Self::new(DelayMinutes::clamped(10), DelayMinutes::clamped(5))
    }
}

impl VirtualMirror {
    /// Create a mirror with everything off and the given delay settings.
    #[must_use]
    pub fn new(delay: DelayMinutes, by_lights: DelayMinutes) -> Self {
        Self {
            went: VirtualRelay::default(),
            lamp: VirtualRelay::default(),
            heater: VirtualRelay::default(),
            auto_toggle: AutoToggle::default(),
            delays: Mutex::new(Delays { delay, by_lights }),
            light_reading: AtomicU32::new(DEFAULT_LIGHT_READING),
            online: AtomicBool::new(true),
            received: Mutex::new(VecDeque::with_capacity(RECEIVED_CAPACITY)),
        }
    }

    /// Change what the light sensor reports.
    pub fn set_light_reading(&self, value: u32) {
        self.light_reading.store(value, Ordering::Relaxed);
    }

    /// Simulate the mirror dropping off (or coming back to) the network.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }

    /// The latest commands received, oldest first, at most
    /// [`RECEIVED_CAPACITY`] of them.
    #[must_use]
    pub fn received(&self) -> Vec<Command> {
        self.lock_received().iter().copied().collect()
    }

    /// Build the current snapshot, firing the automatic toggle first if due.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        if self.auto_toggle.fire_if_due() {
            let on = self.went.toggle();
            tracing::debug!(went = on, "virtual mirror auto toggle fired");
        }
        let delays = *self.lock_delays();
        StatusSnapshot {
            went_sensor_reading: serde_json::json!(u8::from(self.went.is_on())),
            light_sensor_reading: serde_json::json!(self.light_reading.load(Ordering::Relaxed)),
            delay_to_toggle: self.auto_toggle.remaining_millis(),
            mirror_heater_state: self.heater.is_on(),
            mirror_lamp_state: self.lamp.is_on(),
            delay_minutes: Some(delays.delay.into()),
            delay_by_lights_minutes: Some(delays.by_lights.into()),
        }
    }

    /// Apply a command to the simulated state.
    pub fn apply(&self, command: Command) {
        {
            let mut received = self.lock_received();
            if received.len() == RECEIVED_CAPACITY {
                received.pop_front();
            }
            received.push_back(command);
        }
        match command {
            Command::ToggleWent => {
                if self.went.toggle() {
                    self.auto_toggle.arm(self.lock_delays().delay);
                } else {
                    self.auto_toggle.disarm();
                }
            }
            Command::ToggleLight => {
                let lamp_on = self.lamp.toggle();
                if !lamp_on && self.went.is_on() {
                    self.auto_toggle.arm(self.lock_delays().by_lights);
                }
            }
            Command::ToggleHeater => {
                self.heater.toggle();
            }
            Command::SetDelay(minutes) => self.lock_delays().delay = minutes,
            Command::SetDelayByLights(minutes) => self.lock_delays().by_lights = minutes,
        }
    }

    fn ensure_online(&self) -> Result<(), VirtualError> {
        if self.online.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(VirtualError::Offline)
        }
    }

    fn lock_delays(&self) -> MutexGuard<'_, Delays> {
        self.delays.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_received(&self) -> MutexGuard<'_, VecDeque<Command>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceGateway for VirtualMirror {
    async fn fetch_snapshot(&self) -> Result<StatusSnapshot, PanelError> {
        self.ensure_online()?;
        Ok(self.snapshot())
    }

    async fn send(&self, command: Command) -> Result<(), PanelError> {
        self.ensure_online()?;
        self.apply(command);
        Ok(())
    }
}
