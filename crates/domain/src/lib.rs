//! # mirrorpanel-domain
//!
//! Pure domain model for the mirror control panel.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **status snapshot** reported by the mirror device
//! - Define **delay values** (validated 1–60 minute settings)
//! - Define **commands** (toggle went/light/heater, set delays) and their
//!   wire paths
//! - Define the **page view** and the pure `snapshot → view` rendering
//! - Define the **sequence gate** that discards out-of-order responses
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod delay;
pub mod sequence;
pub mod snapshot;
pub mod view;
