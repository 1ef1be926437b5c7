//! Delay setting — a whole number of minutes in `1..=60`.
//!
//! The device accepts two delays: a plain one, and one that starts after the
//! lights are turned off. Both share the same range and input rules: the raw
//! input must be a non-empty run of ASCII digits whose value lies in range.
//! Signs, whitespace, and decimal points are rejected. Leading zeros are
//! accepted and kept, so the value reaches the device exactly as typed
//! (`"05"` is sent as `05`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Message shown to the user when a delay input is rejected.
pub const DELAY_ALERT: &str = "Please enter a valid number between 1 and 60.";

/// A validated delay, in minutes.
///
/// [`Display`](fmt::Display) shows the number of minutes only;
/// [`as_query`](Self::as_query) also restores the leading zeros of the input
/// it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DelayMinutes {
    minutes: u8,
    leading_zeros: u32,
}

impl DelayMinutes {
    /// Smallest accepted delay.
    pub const MIN: u8 = 1;
    /// Largest accepted delay.
    pub const MAX: u8 = 60;

    /// Clamp any number of minutes into the accepted range.
    #[must_use]
    pub fn clamped(minutes: u32) -> Self {
        let max = u32::from(Self::MAX);
        let value = minutes.clamp(u32::from(Self::MIN), max);
        Self::from_minutes(u8::try_from(value).unwrap_or(Self::MAX))
    }

    fn from_minutes(minutes: u8) -> Self {
        Self {
            minutes,
            leading_zeros: 0,
        }
    }

    /// Number of minutes.
    #[must_use]
    pub fn get(self) -> u8 {
        self.minutes
    }

    /// The digits to send to the device, leading zeros included.
    #[must_use]
    pub fn as_query(self) -> String {
        let zeros = usize::try_from(self.leading_zeros).unwrap_or(0);
        format!("{}{}", "0".repeat(zeros), self.minutes)
    }

    /// Duration in milliseconds, the unit the device counts down in.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        u64::from(self.minutes) * 60_000
    }

    fn out_of_range(input: impl Into<String>) -> ValidationError {
        ValidationError::OutOfRange {
            input: input.into(),
            min: Self::MIN,
            max: Self::MAX,
        }
    }
}

impl FromStr for DelayMinutes {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotAnInteger(input.to_string()));
        }
        // all digits: a parse failure can only be an overflow
        let value: u32 = input.parse().map_err(|_| Self::out_of_range(input))?;
        let parsed = Self::try_from(value).map_err(|_| Self::out_of_range(input))?;
        let zeros = input.bytes().take_while(|b| *b == b'0').count();
        Ok(Self {
            leading_zeros: u32::try_from(zeros).map_err(|_| Self::out_of_range(input))?,
            ..parsed
        })
    }
}

impl TryFrom<u32> for DelayMinutes {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(minutes) if (Self::MIN..=Self::MAX).contains(&minutes) => Ok(Self::from_minutes(minutes)),
            _ => Err(Self::out_of_range(value.to_string())),
        }
    }
}

impl From<DelayMinutes> for u32 {
    fn from(value: DelayMinutes) -> Self {
        u32::from(value.minutes)
    }
}

impl fmt::Display for DelayMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.minutes.fmt(f)
    }
}
