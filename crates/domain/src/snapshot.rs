//! Status snapshot — the JSON document served at `/getMemoryData`.

use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::view::DelayInputs;

/// Point-in-time status report of the mirror device.
///
/// Keys are camelCase on the wire. Sensor readings are opaque and only ever
/// displayed. `delayToToggle` is the number of milliseconds until the device
/// flips the went output on its own, absent or `null` when nothing is armed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    #[serde(default)]
    pub went_sensor_reading: serde_json::Value,
    #[serde(default)]
    pub light_sensor_reading: serde_json::Value,
    #[serde(default)]
    pub delay_to_toggle: Option<u64>,
    pub mirror_heater_state: bool,
    pub mirror_lamp_state: bool,
    #[serde(default)]
    pub delay_minutes: Option<u32>,
    #[serde(default)]
    pub delay_by_lights_minutes: Option<u32>,
}

impl StatusSnapshot {
    /// Decode a snapshot from a response body.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Decode`] if the body is not a valid snapshot.
    pub fn from_json(body: &[u8]) -> Result<Self, PanelError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Whole seconds left before the pending toggle, if one is armed.
    #[must_use]
    pub fn toggle_in_seconds(&self) -> Option<u64> {
        self.delay_to_toggle.map(|millis| millis / 1000)
    }

    /// Values used to pre-fill the two delay inputs.
    #[must_use]
    pub fn delay_inputs(&self) -> DelayInputs {
        DelayInputs {
            delay: self.delay_minutes,
            delay_by_lights: self.delay_by_lights_minutes,
        }
    }
}
