//! HTTP device configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where the mirror lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpDeviceConfig {
    /// Base URL of the device web server (e.g. `http://192.168.1.40`).
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpDeviceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.4.1".to_string(),
            timeout_ms: 800,
        }
    }
}

impl HttpDeviceConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
