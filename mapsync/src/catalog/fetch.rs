//! Best-effort retrieval of tipg's collection list.

use thiserror::Error;

use super::remote::{CollectionsResponse, RemoteCatalog};
use crate::log::{Logger, SharedLogger};
use crate::log_debug;
use crate::platform::{Platform, PlatformError};

/// Why the catalog could not be used. Callers fall back to config keys.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch collections: {0}")]
    Fetch(#[from] PlatformError),

    #[error("Invalid collections document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// URL of the collection list for a tipg base URL.
pub fn collections_url(tipg_url: &str) -> String {
    format!("{}/collections", tipg_url.trim_end_matches('/'))
}

/// GET and parse `{tipg_url}/collections`.
pub async fn fetch_catalog<P: Platform>(
    platform: &P,
    tipg_url: &str,
    preferred_schema: &str,
    logger: &SharedLogger,
) -> Result<RemoteCatalog, CatalogError> {
    let url = collections_url(tipg_url);
    let body = platform.http_get(&url).await?;
    let response: CollectionsResponse = serde_json::from_slice(&body)?;
    log_debug!(
        logger,
        "catalog lists {} collections",
        response.collections.len()
    );
    Ok(RemoteCatalog::from_response(&response, preferred_schema, logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;
    use crate::platform::MockPlatform;
    use std::sync::Arc;

    fn logger() -> SharedLogger {
        Arc::new(NoOpLogger)
    }

    #[test]
    fn test_collections_url() {
        assert_eq!(collections_url("http://tipg"), "http://tipg/collections");
        assert_eq!(collections_url("/api/"), "/api/collections");
    }

    #[tokio::test]
    async fn test_fetch_strips_schema() {
        let platform = MockPlatform::new().with_body(
            "http://tipg/collections",
            r#"{"links": [], "collections": [
                {"id": "gunnison.road", "title": "road", "itemType": "feature"},
                {"id": "gunnison.towns"}
            ]}"#,
        );

        let catalog = fetch_catalog(&platform, "http://tipg", "gunnison", &logger())
            .await
            .unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["road", "towns"]);
    }

    #[tokio::test]
    async fn test_fetch_reports_status() {
        let platform = MockPlatform::new();
        let err = fetch_catalog(&platform, "http://tipg", "public", &logger())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Fetch(PlatformError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_reports_bad_json() {
        let platform = MockPlatform::new().with_body("http://tipg/collections", "<html>");
        let err = fetch_catalog(&platform, "http://tipg", "public", &logger())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
