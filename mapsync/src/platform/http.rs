//! Production platform backed by `reqwest`.

use std::time::Duration;

use tracing::{debug, warn};

use super::{Platform, PlatformError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("mapsync/", env!("CARGO_PKG_VERSION"));

/// [`Platform`] that performs real HTTP requests.
///
/// The page location is whatever the embedding host reports; a CLI run has
/// none, so relative tipg URLs are not reachable from it.
#[derive(Clone)]
pub struct ReqwestPlatform {
    client: reqwest::Client,
    origin: Option<String>,
    port: Option<u16>,
}

impl ReqwestPlatform {
    pub fn new() -> Result<Self, PlatformError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PlatformError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            origin: None,
            port: None,
        })
    }

    /// Report `origin` and `port` as the page location.
    pub fn with_location(mut self, origin: impl Into<String>, port: Option<u16>) -> Self {
        self.origin = Some(origin.into());
        self.port = port;
        self
    }
}

impl Platform for ReqwestPlatform {
    fn current_origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn current_port(&self) -> Option<u16> {
        self.port
    }

    async fn http_get(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlatformError::HttpError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success response");
            return Err(PlatformError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| PlatformError::HttpError(format!("Failed to read response: {}", e)))
    }
}
