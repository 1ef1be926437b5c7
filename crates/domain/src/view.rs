//! Page view — what the control panel displays for a snapshot.
//!
//! [`PageView::render`] is a pure function of the snapshot: button labels
//! and `on`/`off` classes always follow the last received relay booleans,
//! never a locally predicted state.

use serde::{Deserialize, Serialize};

use crate::snapshot::StatusSnapshot;
use crate::time::Timestamp;

/// Text shown when no automatic toggle is pending.
pub const NOT_AVAILABLE: &str = "N/A";

/// Visual state of a relay button, also used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    #[default]
    Off,
}

impl SwitchState {
    /// Capitalized label suffix (`On` / `Off`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A relay toggle button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonView {
    pub label: String,
    pub state: SwitchState,
}

impl ButtonView {
    fn relay(name: &str, on: bool) -> Self {
        let state = SwitchState::from(on);
        Self {
            label: format!("{name}: {}", state.label()),
            state,
        }
    }
}

/// Everything the panel shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub went_sensor: String,
    pub light_sensor: String,
    /// Whole seconds until the automatic toggle, or [`NOT_AVAILABLE`].
    pub toggle_in: String,
    pub lamp: ButtonView,
    pub heater: ButtonView,
    pub received_at: Timestamp,
}

impl PageView {
    /// Render a snapshot received at `received_at`.
    #[must_use]
    pub fn render(snapshot: &StatusSnapshot, received_at: Timestamp) -> Self {
        Self {
            went_sensor: reading(&snapshot.went_sensor_reading),
            light_sensor: reading(&snapshot.light_sensor_reading),
            toggle_in: snapshot
                .toggle_in_seconds()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |secs| secs.to_string()),
            lamp: ButtonView::relay("Mirror Light", snapshot.mirror_lamp_state),
            heater: ButtonView::relay("Mirror Heater", snapshot.mirror_heater_state),
            received_at,
        }
    }
}

// strings unquoted, anything else as JSON (`null` included)
fn reading(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Pre-filled values of the two delay inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelayInputs {
    pub delay: Option<u32>,
    pub delay_by_lights: Option<u32>,
}

/// Reachability of the device as last observed by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Full panel state published to UI adapters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelState {
    /// Last rendered view, `None` until the first snapshot arrives.
    pub view: Option<PageView>,
    pub inputs: DelayInputs,
    pub link: LinkState,
    /// Pending blocking alert, cleared once shown.
    pub alert: Option<String>,
}
