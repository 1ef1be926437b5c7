//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PanelError`]
//! via `#[from]` (or an explicit `into_domain`) at port boundaries.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// User input failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The device answered with a body that is not a valid snapshot.
    #[error("failed to decode device response")]
    Decode(#[from] serde_json::Error),

    /// The device could not be reached or answered with an error status.
    #[error("device request failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The poller loop is no longer accepting actions.
    #[error("poller is not running")]
    Closed,
}

impl PanelError {
    /// Wrap any transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}

/// Validation failures for user-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The input is empty or contains anything but ASCII digits.
    #[error("delay must be a whole number of minutes, got {0:?}")]
    NotAnInteger(String),

    /// The input is a whole number outside the accepted range.
    #[error("delay must be between {min} and {max} minutes, got {input}")]
    OutOfRange { input: String, min: u8, max: u8 },
}
