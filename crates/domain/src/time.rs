//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a snapshot is received.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Wall-clock `HH:MM:SS` rendering used by the panel footer.
#[must_use]
pub fn clock(ts: Timestamp) -> String {
    ts.format("%H:%M:%S").to_string()
}
