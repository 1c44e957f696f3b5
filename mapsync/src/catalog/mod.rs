//! Layer catalog resolution.
//!
//! Merges the collections tipg reports with the local overrides in
//! `config.json` into one ordered, deduplicated [`ResolvedLayerList`].
//!
//! ```text
//! tipg /collections ──► RemoteCatalog (schema-stripped, deduplicated)
//!                                │
//! config.json layers ────────────┴──► LayerCatalogResolver::resolve ──► ResolvedLayerList
//! ```
//!
//! A layer is only emitted when its override names a geometry type; the
//! catalog carries no geometry metadata, so nothing is inferred from it.

mod fetch;
mod remote;
mod resolver;


pub use fetch::{collections_url, fetch_catalog, CatalogError};
pub use remote::{
    strip_schema, CollectionsResponse, RemoteCatalog, RemoteCollection, SchemaCollision,
};
pub use resolver::{LayerCatalogResolver, ResolvedLayerList};
