// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered child collection shared by the root and every item.

use alloc::vec::Vec;

use crate::ItemId;

/// An ordered, indexable collection of item ids.
///
/// Index order is paint order: index 0 is painted first and sits at the
/// bottom. Hit testing and event routing walk the same sequence in reverse
/// ([`ItemContainer::hit_order`]) so that the item drawn on top is tested
/// first. Indices are stable until a removal, after which later items shift
/// down by one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemContainer {
    items: Vec<ItemId>,
}

impl ItemContainer {
    /// Create an empty container.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).copied()
    }

    /// Index of `id`, if present.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|&c| c == id)
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    /// Items in paint order (bottom to top).
    pub fn as_slice(&self) -> &[ItemId] {
        &self.items
    }

    /// Iterate in paint order (ascending index).
    pub fn paint_order(&self) -> impl DoubleEndedIterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    /// Iterate in hit-test order (descending index).
    pub fn hit_order(&self) -> impl DoubleEndedIterator<Item = ItemId> + '_ {
        self.items.iter().rev().copied()
    }

    /// Append on top and return the new index.
    pub(crate) fn push(&mut self, id: ItemId) -> usize {
        debug_assert!(!self.contains(id), "item is already in this container");
        self.items.push(id);
        self.items.len() - 1
    }

    /// Remove `id`, shifting later items down. Returns its former index.
    pub(crate) fn remove(&mut self, id: ItemId) -> Option<usize> {
        let index = self.index_of(id)?;
        self.items.remove(index);
        Some(index)
    }

    pub(crate) fn take_all(&mut self) -> Vec<ItemId> {
        core::mem::take(&mut self.items)
    }

    /// Move `id` to the top. Returns its new index.
    pub(crate) fn raise(&mut self, id: ItemId) -> Option<usize> {
        let from = self.index_of(id)?;
        let last = self.items.len() - 1;
        self.items[from..].rotate_left(1);
        Some(last)
    }

    /// Move `id` to the bottom. Returns its new index (always 0).
    pub(crate) fn lower(&mut self, id: ItemId) -> Option<usize> {
        let from = self.index_of(id)?;
        self.items[..=from].rotate_right(1);
        Some(0)
    }

    /// Move `id` directly above `under`. Returns the new index of `id`.
    pub(crate) fn stack_above(&mut self, id: ItemId, under: ItemId) -> Option<usize> {
        let from = self.index_of(id)?;
        let anchor = self.index_of(under)?;
        if from == anchor {
            return Some(from);
        }
        self.items.remove(from);
        let anchor = self.index_of(under)?;
        self.items.insert(anchor + 1, id);
        Some(anchor + 1)
    }

    /// Move `id` directly below `above`. Returns the new index of `id`.
    pub(crate) fn stack_under(&mut self, id: ItemId, above: ItemId) -> Option<usize> {
        let from = self.index_of(id)?;
        let anchor = self.index_of(above)?;
        if from == anchor {
            return Some(from);
        }
        self.items.remove(from);
        let anchor = self.index_of(above)?;
        self.items.insert(anchor, id);
        Some(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ids(n: u32) -> Vec<ItemId> {
        (0..n).map(|i| ItemId::new(i, 1)).collect()
    }

    fn filled(ids: &[ItemId]) -> ItemContainer {
        let mut c = ItemContainer::new();
        for &id in ids {
            c.push(id);
        }
        c
    }

    #[test]
    fn hit_order_mirrors_paint_order() {
        let ids = ids(4);
        let c = filled(&ids);
        let paint: Vec<_> = c.paint_order().collect();
        let mut hit: Vec<_> = c.hit_order().collect();
        hit.reverse();
        assert_eq!(paint, hit);
        assert_eq!(c.hit_order().next(), Some(ids[3]));
    }

    #[test]
    fn removal_shifts_later_items_down() {
        let ids = ids(4);
        let mut c = filled(&ids);
        assert_eq!(c.remove(ids[1]), Some(1));
        assert_eq!(c.index_of(ids[2]), Some(1));
        assert_eq!(c.index_of(ids[3]), Some(2));
        assert_eq!(c.remove(ids[1]), None);
    }

    #[test]
    fn raise_and_lower() {
        let ids = ids(4);
        let mut c = filled(&ids);
        assert_eq!(c.raise(ids[0]), Some(3));
        assert_eq!(c.as_slice(), &[ids[1], ids[2], ids[3], ids[0]]);
        assert_eq!(c.lower(ids[3]), Some(0));
        assert_eq!(c.as_slice(), &[ids[3], ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn stack_above_and_under() {
        let ids = ids(4);
        let mut c = filled(&ids);
        assert_eq!(c.stack_above(ids[0], ids[2]), Some(2));
        assert_eq!(c.as_slice(), &[ids[1], ids[2], ids[0], ids[3]]);
        assert_eq!(c.stack_under(ids[3], ids[1]), Some(0));
        assert_eq!(c.as_slice(), &[ids[3], ids[1], ids[2], ids[0]]);
        assert_eq!(c.stack_above(ids[1], ids[1]), Some(1));
        assert_eq!(c.stack_under(ids[0], ItemId::new(99, 1)), None);
        assert_eq!(c.as_slice(), &[ids[3], ids[1], ids[2], ids[0]], "failed ops must not reorder");
        assert_eq!(c.take_all(), vec![ids[3], ids[1], ids[2], ids[0]]);
        assert!(c.is_empty());
    }
}
