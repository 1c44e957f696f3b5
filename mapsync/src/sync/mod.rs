//! Reconciliation of enabled layers against the rendering surface.
//!
//! [`LayerSyncEngine::reconcile`] compares the desired set with what the map
//! actually holds and only adds or removes what differs. It may be called
//! any number of times; a pass over an already converged map changes
//! nothing.

mod engine;
pub mod style;

pub use engine::{LayerSyncEngine, SyncFailure, SyncReport};
pub use style::{base_layer_id, sublayer_ids, tile_url, SublayerKind};
