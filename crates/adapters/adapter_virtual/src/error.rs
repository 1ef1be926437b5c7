//! Virtual device error types.

use mirrorpanel_domain::error::PanelError;

/// Errors raised by the simulated mirror.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// The device was switched offline to simulate an unreachable mirror.
    #[error("virtual mirror is offline")]
    Offline,
}

impl From<VirtualError> for PanelError {
    fn from(err: VirtualError) -> Self {
        PanelError::transport(err)
    }
}
