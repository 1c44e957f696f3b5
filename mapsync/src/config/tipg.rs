//! Deriving the tipg base URL when the config leaves it null.

use super::defaults::{DEV_SERVER_PORT, DEV_TIPG_URL, TIPG_PROXY_PATH};
use crate::platform::Platform;

/// Resolve the tipg base URL.
///
/// An explicit URL wins. Otherwise the dev server port maps to the local
/// tipg instance, any other page maps to `{origin}/api`, and with no page
/// location at all the relative `/api` is used. Trailing slashes are trimmed.
pub fn resolve_tipg_url<P: Platform>(explicit: Option<&str>, platform: &P) -> String {
    if let Some(url) = explicit {
        return url.trim_end_matches('/').to_string();
    }

    if platform.current_port() == Some(DEV_SERVER_PORT) {
        return DEV_TIPG_URL.to_string();
    }

    match platform.current_origin() {
        Some(origin) => format!("{}{}", origin.trim_end_matches('/'), TIPG_PROXY_PATH),
        None => TIPG_PROXY_PATH.to_string(),
    }
}
