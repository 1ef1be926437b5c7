//! Commands sent to the mirror device and their HTTP paths.
//!
//! Every command is a plain `GET` whose response body is ignored.
//!
//! | Command | Path | Query |
//! |---------|------|-------|
//! | [`Command::ToggleWent`] | `/changeState` | — |
//! | [`Command::ToggleLight`] | `/toggleMirrorLight` | — |
//! | [`Command::ToggleHeater`] | `/toggleMirrorHeater` | — |
//! | [`Command::SetDelay`] | `/setDelay` | `value=1..60` |
//! | [`Command::SetDelayByLights`] | `/setDelayByLights` | `value=1..60` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::delay::DelayMinutes;

/// Path of the status snapshot endpoint.
pub const SNAPSHOT_PATH: &str = "/getMemoryData";

/// Name of the query parameter carrying a delay value.
pub const VALUE_PARAM: &str = "value";

/// Output toggled by one of the panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleTarget {
    Went,
    Light,
    Heater,
}

/// Which of the two delay settings a value is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayKind {
    /// Delay before the went output toggles on its own.
    Delay,
    /// Delay counted from the moment the lights are turned off.
    DelayByLights,
}

/// A fire-and-forget request to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleWent,
    ToggleLight,
    ToggleHeater,
    SetDelay(DelayMinutes),
    SetDelayByLights(DelayMinutes),
}

impl Command {
    /// Build the toggle command for a button.
    #[must_use]
    pub fn toggle(target: ToggleTarget) -> Self {
        match target {
            ToggleTarget::Went => Self::ToggleWent,
            ToggleTarget::Light => Self::ToggleLight,
            ToggleTarget::Heater => Self::ToggleHeater,
        }
    }

    /// Build the command storing `minutes` into the given delay setting.
    #[must_use]
    pub fn set_delay(kind: DelayKind, minutes: DelayMinutes) -> Self {
        match kind {
            DelayKind::Delay => Self::SetDelay(minutes),
            DelayKind::DelayByLights => Self::SetDelayByLights(minutes),
        }
    }

    /// Endpoint path on the device.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::ToggleWent => "/changeState",
            Self::ToggleLight => "/toggleMirrorLight",
            Self::ToggleHeater => "/toggleMirrorHeater",
            Self::SetDelay(_) => "/setDelay",
            Self::SetDelayByLights(_) => "/setDelayByLights",
        }
    }

    /// Query parameter, if the command carries a value.
    #[must_use]
    pub fn query(&self) -> Option<(&'static str, String)> {
        match self {
            Self::SetDelay(minutes) | Self::SetDelayByLights(minutes) => {
                Some((VALUE_PARAM, minutes.as_query()))
            }
            Self::ToggleWent | Self::ToggleLight | Self::ToggleHeater => None,
        }
    }
}

/// Renders the path and query, e.g. `/setDelay?value=15`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())?;
        if let Some((name, value)) = self.query() {
            write!(f, "?{name}={value}")?;
        }
        Ok(())
    }
}
