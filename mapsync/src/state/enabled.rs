//! Immutable enabled-layer set.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Ids of the layers the user wants on the map.
///
/// Values are never mutated in place. [`EnabledLayerSet::toggled`] returns a
/// new set; clones share storage until then.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledLayerSet {
    ids: Arc<BTreeSet<String>>,
}

impl EnabledLayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Arc::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// A copy with `id` flipped: removed if present, inserted otherwise.
    pub fn toggled(&self, id: &str) -> Self {
        let mut ids = (*self.ids).clone();
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        Self { ids: Arc::new(ids) }
    }

    /// Ids in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EnabledLayerSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_ids(iter)
    }
}
