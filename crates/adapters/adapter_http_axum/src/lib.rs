//! # mirrorpanel-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **control panel page**: sensor readings, the toggle
//!   countdown, the three toggle buttons and the two delay forms
//! - Serve a small **JSON API** (`/api/view`) and an **SSE stream**
//!   (`/api/view/stream`) of the latest panel state
//! - Turn form submissions into [`UserAction`]s queued to the poller; delay
//!   forms wait for the outcome so the redirected page already shows it
//!
//! ## No-JS page
//! - The page is rendered server-side from an askama template
//!   (`templates/panel.html`), which escapes all device text.
//! - Buttons and delay inputs are `<form>` elements that POST back to the
//!   server and redirect to `/` (PRG pattern).
//! - `<meta http-equiv="refresh">` reloads the page every poll interval.
//!
//! ## Dependency rule
//! Depends on `mirrorpanel-app` (poller handle and watch view) and
//! `mirrorpanel-domain` (view types). Handlers never talk to the device.
//!
//! [`UserAction`]: mirrorpanel_app::runner::UserAction

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
