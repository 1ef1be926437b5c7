//! # mirrorpanel-adapter-http-reqwest
//!
//! Talks to the real mirror over plain HTTP GET requests.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | fetch snapshot | `GET {base}/getMemoryData` |
//! | toggle | `GET {base}/changeState`, `/toggleMirrorLight`, `/toggleMirrorHeater` |
//! | delay | `GET {base}/setDelay?value=N`, `/setDelayByLights?value=N` |
//!
//! Command responses are checked for a success status only; their bodies are
//! never read.
//!
//! ## Dependency rule
//!
//! Depends on `mirrorpanel-app` (port traits) and `mirrorpanel-domain` only.

pub mod config;
pub mod error;

use mirrorpanel_app::ports::DeviceGateway;
use mirrorpanel_domain::command::{Command, SNAPSHOT_PATH};
use mirrorpanel_domain::error::PanelError;
use mirrorpanel_domain::snapshot::StatusSnapshot;

pub use config::HttpDeviceConfig;
use error::HttpError;

/// [`DeviceGateway`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestGateway {
    /// Build a gateway for the device at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the base URL is not an absolute
    /// `http`/`https` URL, or [`HttpError::Client`] if the client cannot be built.
    pub fn new(config: &HttpDeviceConfig) -> Result<Self, HttpError> {
        let parsed = reqwest::Url::parse(&config.base_url)
            .map_err(|_| HttpError::InvalidUrl(config.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(HttpError::InvalidUrl(config.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(HttpError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(skip(self), fields(base = %self.base_url))]
    async fn get(
        &self,
        path: &str,
        query: Option<(&'static str, String)>,
    ) -> Result<reqwest::Response, HttpError> {
        let mut request = self.client.get(format!("{}{path}", self.base_url));
        if let Some((key, value)) = query {
            request = request.query(&[(key, value)]);
        }

        let response = request.send().await.map_err(HttpError::Request)?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "device rejected request");
            return Err(HttpError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn fetch(&self) -> Result<StatusSnapshot, HttpError> {
        let response = self.get(SNAPSHOT_PATH, None).await?;
        let body = response.bytes().await.map_err(HttpError::Request)?;
        StatusSnapshot::from_json(&body).map_err(HttpError::Domain)
    }
}

impl DeviceGateway for ReqwestGateway {
    async fn fetch_snapshot(&self) -> Result<StatusSnapshot, PanelError> {
        Ok(self.fetch().await?)
    }

    async fn send(&self, command: Command) -> Result<(), PanelError> {
        self.get(command.path(), command.query()).await?;
        Ok(())
    }
}
