//! # mirrorpanel-app
//!
//! Application layer — the status poller use-case and **port definitions**
//! (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DeviceGateway` — fetch snapshots from and send commands to the device
//!   - `PanelView` — receive rendered views, pre-filled inputs, alerts, and
//!     link-state changes
//! - Define the **driving use-case**:
//!   - `StatusPoller` — fetch and render, toggle outputs, submit delays
//!   - `PollerRunner` / `PollerHandle` — the single event loop that owns the
//!     poll timer and serializes user actions
//! - Provide **in-process infrastructure** (`WatchView`) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `mirrorpanel-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod runner;
pub mod services;
pub mod watch_view;
