//! Observable layer state.
//!
//! [`LayerStateStore`] owns the resolved layer list, the enabled set and the
//! map-ready flag. Every write bumps a revision that is published on a
//! `tokio::sync::watch` channel, so observers see coalesced changes rather
//! than every individual write.

mod enabled;
mod store;

pub use enabled::EnabledLayerSet;
pub use store::{LayerStateStore, StateWriter};
