//! The in-memory catalog mirror and its event application rules.
//!
//! # Invariant
//!
//! At any time the mapping equals the last full snapshot with every event
//! received since applied in arrival order: exactly one entry per live
//! id, each holding the fields of the last event affecting that id.

use std::collections::BTreeMap;

use stockroom_types::{ChangeEvent, Item, ItemId};

/// Local, eventually-consistent mirror of the item catalog.
///
/// Owned exclusively by its [`Synchronizer`]; external readers receive
/// read-only views, never mutation handles.
///
/// [`Synchronizer`]: crate::sync::Synchronizer
#[derive(Debug, Default)]
pub struct Replica {
    /// Mirrored items, keyed by id.
    items: BTreeMap<ItemId, Item>,
}

impl Replica {
    /// Create a new empty replica.
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Return the number of mirrored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return whether the replica mirrors no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up one item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Iterate over all mirrored items, ordered by id.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Replace the entire mirror with a freshly fetched snapshot.
    ///
    /// The new mapping is built in full before the old one is dropped, so
    /// no reader of `self` can ever observe a partially overwritten
    /// state.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = items.into_iter().map(|item| (item.id, item)).collect();
        tracing::debug!(count = self.items.len(), "replica replaced from snapshot");
    }

    /// Apply one change event in arrival order.
    ///
    /// - `Inserted`: insert, overwriting any entry with the same id
    ///   (duplicate delivery is idempotent).
    /// - `Updated`: replace the matching entry; if the id is unknown
    ///   (the event outran the entry), insert it -- self-healing merge.
    /// - `Deleted`: remove the entry; a no-op for an unknown id.
    ///
    /// Events are never reordered or batched, so last-writer-wins per id
    /// reflects feed order.
    pub fn apply(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Inserted(item) => {
                self.items.insert(item.id, item);
            }
            ChangeEvent::Updated(item) => {
                if self.items.insert(item.id, item).is_none() {
                    tracing::debug!("update for unknown item inserted (self-healing)");
                }
            }
            ChangeEvent::Deleted(id) => {
                self.items.remove(&id);
            }
        }
    }

    /// Search the mirror by name or id.
    ///
    /// A query that parses as an integer matches the exact id; any other
    /// query matches item names case-insensitively as a substring. At
    /// most `limit` items are returned.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Item> {
        let trimmed = query.trim();

        if let Ok(raw) = trimmed.parse::<i64>() {
            return self
                .get(ItemId::new(raw))
                .into_iter()
                .take(limit)
                .collect();
        }

        let needle = trimmed.to_lowercase();
        self.items
            .values()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}
