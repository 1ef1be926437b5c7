//! Device gateway port — the six HTTP endpoints of the mirror device.

use std::future::Future;

use mirrorpanel_domain::command::Command;
use mirrorpanel_domain::error::PanelError;
use mirrorpanel_domain::snapshot::StatusSnapshot;

/// Access to the mirror device.
pub trait DeviceGateway {
    /// Read the current status snapshot (`GET /getMemoryData`).
    fn fetch_snapshot(&self) -> impl Future<Output = Result<StatusSnapshot, PanelError>> + Send;

    /// Send a command.
    ///
    /// Resolves once the device has acknowledged the request with a success
    /// status. The response body is never read.
    fn send(&self, command: Command) -> impl Future<Output = Result<(), PanelError>> + Send;
}

impl<T: DeviceGateway + Send + Sync> DeviceGateway for std::sync::Arc<T> {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<StatusSnapshot, PanelError>> + Send {
        (**self).fetch_snapshot()
    }

    fn send(&self, command: Command) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).send(command)
    }
}
