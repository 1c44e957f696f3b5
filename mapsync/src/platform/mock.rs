//! Canned-response platform for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{Platform, PlatformError};

/// Serves fixed bodies per URL and records every request.
#[derive(Default)]
pub struct MockPlatform {
    origin: Option<String>,
    port: Option<u16>,
    responses: HashMap<String, Result<Vec<u8>, PlatformError>>,
    requests: Mutex<Vec<String>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, origin: &str, port: u16) -> Self {
        self.origin = Some(origin.to_string());
        self.port = Some(port);
        self
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Ok(body.as_bytes().to_vec()));
        self
    }

    pub fn with_error(mut self, url: &str, error: PlatformError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Platform for MockPlatform {
    fn current_origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn current_port(&self) -> Option<u16> {
        self.port
    }

    async fn http_get(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(PlatformError::Status {
                status: 404,
                url: url.to_string(),
            })
        })
    }
}
