//! HTTP device adapter error types.

use mirrorpanel_domain::error::PanelError;

/// Errors specific to talking to the mirror over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The configured base URL is not an absolute `http(s)` URL.
    #[error("invalid device URL {0:?}")]
    InvalidUrl(String),

    /// The request could not be sent or its body could not be read.
    #[error("request to device failed")]
    Request(#[source] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("device answered with status {0}")]
    Status(u16),

    /// A domain-level error (decode, validation, ...).
    #[error("domain error")]
    Domain(#[source] PanelError),
}

impl HttpError {
    /// Convert into a [`PanelError`] for propagation across port boundaries.
    pub fn into_domain(self) -> PanelError {
        match self {
            Self::Domain(err) => err,
            other => PanelError::transport(other),
        }
    }
}

impl From<HttpError> for PanelError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}
