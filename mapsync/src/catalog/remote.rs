//! tipg collection catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::log::{Logger, SharedLogger};
use crate::{log_debug, log_warn};

/// One entry of tipg's `/collections` response. Only `id` is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCollection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

/// The `/collections` document. Other top-level fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsResponse {
    #[serde(default)]
    pub collections: Vec<RemoteCollection>,
}

/// Split `schema.name` into its schema and bare name.
///
/// Only the first two dot-separated segments are considered: `a.b.c` yields
/// schema `a` and name `b`. Ids without a dot have no schema.
pub fn strip_schema(id: &str) -> (Option<&str>, &str) {
    let mut parts = id.split('.');
    let first = parts.next().unwrap_or(id);
    match parts.next() {
        Some(name) => (Some(first), name),
        None => (None, id),
    }
}

/// Two catalog entries that reduced to the same bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCollision {
    pub name: String,
    /// Schema of the entry that was kept.
    pub kept: Option<String>,
    /// Schema of the entry that was dropped.
    pub dropped: Option<String>,
}

/// Schema-stripped, deduplicated collection ids in catalog order.
///
/// When two schemas expose the same name, the one matching the configured
/// schema prefix is kept; otherwise the first in catalog order is kept. The
/// surviving id keeps the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCatalog {
    entries: IndexMap<String, Option<String>>,
    collisions: Vec<SchemaCollision>,
}

impl RemoteCatalog {
    /// Build from raw collection ids.
    pub fn from_ids<I, S>(ids: I, preferred_schema: &str, logger: &SharedLogger) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();

        for raw in ids {
            let raw = raw.as_ref();
            let (schema, name) = strip_schema(raw);
            if name.is_empty() {
                log_debug!(logger, "ignoring catalog entry with empty name: '{}'", raw);
                continue;
            }

            let Some(existing) = catalog.entries.get_mut(name) else {
                catalog
                    .entries
                    .insert(name.to_string(), schema.map(str::to_string));
                continue;
            };

            let incoming = schema.map(str::to_string);
            if *existing == incoming {
                continue;
            }

            let prefer_incoming = schema == Some(preferred_schema)
                && existing.as_deref() != Some(preferred_schema);
            let collision = if prefer_incoming {
                let dropped = std::mem::replace(existing, incoming);
                SchemaCollision {
                    name: name.to_string(),
                    kept: existing.clone(),
                    dropped,
                }
            } else {
                SchemaCollision {
                    name: name.to_string(),
                    kept: existing.clone(),
                    dropped: incoming,
                }
            };

            log_warn!(
                logger,
                "collection '{}' exposed by several schemas; keeping {:?}, dropping {:?}",
                collision.name,
                collision.kept,
                collision.dropped
            );
            catalog.collisions.push(collision);
        }

        catalog
    }

    /// Build from a parsed `/collections` response.
    pub fn from_response(
        response: &CollectionsResponse,
        preferred_schema: &str,
        logger: &SharedLogger,
    ) -> Self {
        Self::from_ids(
            response.collections.iter().map(|c| c.id.as_str()),
            preferred_schema,
            logger,
        )
    }

    /// Bare ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Schema the surviving entry for `id` came from.
    pub fn schema_of(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|s| s.as_deref())
    }

    pub fn collisions(&self) -> &[SchemaCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
