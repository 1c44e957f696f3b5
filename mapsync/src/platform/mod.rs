//! Host environment adapter.
//!
//! Everything the engine needs from its surroundings (page location and an
//! HTTP GET) goes through [`Platform`], so URL derivation and config loading
//! run in tests without a browser or a network.

mod http;
#[cfg(test)]
mod mock;

pub use http::ReqwestPlatform;
#[cfg(test)]
pub use mock::MockPlatform;

use std::future::Future;

use thiserror::Error;

/// Errors from platform I/O.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlatformError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

/// Access to the hosting environment.
pub trait Platform: Send + Sync {
    /// Origin of the page hosting the map, e.g. `https://maps.example.org`.
    fn current_origin(&self) -> Option<String>;

    /// Port of the page hosting the map.
    fn current_port(&self) -> Option<u16>;

    /// GET `url` and return the body of a 2xx response.
    fn http_get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, PlatformError>> + Send;
}
