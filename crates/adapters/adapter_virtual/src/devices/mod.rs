//! Simulated parts of the mirror — relays and the automatic toggle timer.

mod auto_toggle;
mod relay;

pub use auto_toggle::AutoToggle;
pub use relay::VirtualRelay;
