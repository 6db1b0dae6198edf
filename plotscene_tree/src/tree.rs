// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, coordinate mapping.

use alloc::vec::Vec;
use kurbo::Point;

use crate::container::ItemContainer;
use crate::error::TreeError;
use crate::types::{ItemFlags, ItemId, LocalItem, clamp_opacity};
use crate::Transform2D;

/// Ordered tree of items, each carrying a payload `T`.
///
/// The tree owns a root [`ItemContainer`] and one container per item. All
/// ownership flows from parent to child; references back up the tree are
/// plain [`ItemId`]s, which are checked for liveness on every access.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use plotscene_tree::{ItemTree, LocalItem, Transform2D};
///
/// let mut tree = ItemTree::new();
/// let plot = tree.insert(None, LocalItem::default(), "plot").unwrap();
/// let legend = tree
///     .insert(Some(plot), LocalItem::with_transform(Transform2D::translate(10.0, 10.0)), "legend")
///     .unwrap();
///
/// assert_eq!(tree.parent_of(legend), Some(plot));
/// assert_eq!(tree.map_from_root(legend, Point::new(15.0, 15.0)), Some(Point::new(5.0, 5.0)));
///
/// // Removing detaches the subtree; the ids go stale.
/// let detached = tree.remove(plot).unwrap();
/// assert!(!tree.is_alive(legend));
/// assert_eq!(detached.children.len(), 1);
/// ```
pub struct ItemTree<T> {
    /// slots
    nodes: Vec<Option<Node<T>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: ItemContainer,
}

impl<T> core::fmt::Debug for ItemTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("ItemTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

impl<T> Default for ItemTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    parent: Option<ItemId>,
    children: ItemContainer,
    local: LocalItem,
    payload: T,
}

/// A subtree that has been removed from an [`ItemTree`].
///
/// Local state (transform, opacity, flags) and payloads are kept untouched so
/// the subtree can be attached again with [`ItemTree::attach`]. Re-attached
/// items receive fresh ids.
#[derive(Clone, Debug)]
pub struct Detached<T> {
    /// Local state of the subtree root.
    pub local: LocalItem,
    /// Payload of the subtree root.
    pub payload: T,
    /// Detached children, in paint order.
    pub children: Vec<Detached<T>>,
}

impl<T> Detached<T> {
    /// A standalone item with no children.
    pub fn new(local: LocalItem, payload: T) -> Self {
        Self {
            local,
            payload,
            children: Vec::new(),
        }
    }

    /// Number of items in this subtree, including the root.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always `false`: a detached subtree holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<T> ItemTree<T> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: ItemContainer::new(),
        }
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` refers to a live item.
    ///
    /// An `ItemId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: ItemId) -> bool {
        self.node(id).is_some()
    }

    /// Insert a new item on top of `parent`'s container (or the root container if `None`).
    pub fn insert(
        &mut self,
        parent: Option<ItemId>,
        local: LocalItem,
        payload: T,
    ) -> Result<ItemId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleParent(p));
        }
        Ok(self.insert_unchecked(parent, local, payload))
    }

    /// Insert a new top-level item on top of the root container.
    ///
    /// Unlike [`ItemTree::insert`] this cannot fail.
    pub fn insert_root(&mut self, local: LocalItem, payload: T) -> ItemId {
        self.insert_unchecked(None, local, payload)
    }

    /// Attach a previously detached subtree on top of `parent`'s container.
    ///
    /// Returns the new id of the subtree root.
    pub fn attach(
        &mut self,
        parent: Option<ItemId>,
        detached: Detached<T>,
    ) -> Result<ItemId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleParent(p));
        }
        Ok(self.attach_unchecked(parent, detached))
    }

    /// Remove an item and its subtree.
    ///
    /// Every id in the subtree becomes stale immediately. Later siblings shift
    /// down by one. Returns `None` for stale ids.
    pub fn remove(&mut self, id: ItemId) -> Option<Detached<T>> {
        let parent = self.node(id)?.parent;
        match parent {
            Some(p) => {
                self.node_mut(p)?.children.remove(id);
            }
            None => {
                self.roots.remove(id);
            }
        }
        self.take_subtree(id)
    }

    /// Remove every child of `parent` (or every root item if `None`).
    ///
    /// Returns the detached subtrees in paint order.
    pub fn clear(&mut self, parent: Option<ItemId>) -> Vec<Detached<T>> {
        let ids = match parent {
            Some(p) => match self.node_mut(p) {
                Some(n) => n.children.take_all(),
                None => return Vec::new(),
            },
            None => self.roots.take_all(),
        };
        ids.into_iter().filter_map(|id| self.take_subtree(id)).collect()
    }

    /// Move `id` on top of `new_parent`'s container, keeping its subtree.
    pub fn reparent(&mut self, id: ItemId, new_parent: Option<ItemId>) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleItem(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(TreeError::StaleParent(p));
            }
            let mut cur = Some(p);
            while let Some(c) = cur {
                if c == id {
                    return Err(TreeError::WouldCycle { item: id, parent: p });
                }
                cur = self.parent_of(c);
            }
        }
        self.unlink(id);
        self.link(id, new_parent);
        Ok(())
    }

    /// Returns the parent of an item if live, or `None` for top-level items or stale ids.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// The top-level ancestor of `id` (which may be `id` itself).
    pub fn top_level_of(&self, id: ItemId) -> Option<ItemId> {
        let mut cur = id;
        self.node(cur)?;
        while let Some(p) = self.parent_of(cur) {
            cur = p;
        }
        Some(cur)
    }

    /// Iterate the ancestors of `id`, nearest first. Empty for stale ids.
    pub fn ancestors(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        core::iter::successors(self.parent_of(id), move |&p| self.parent_of(p))
    }

    /// The root container holding top-level items.
    pub fn roots(&self) -> &ItemContainer {
        &self.roots
    }

    /// The container of `parent`'s children, or the root container for `None`.
    ///
    /// Returns `None` if `parent` is stale.
    pub fn container(&self, parent: Option<ItemId>) -> Option<&ItemContainer> {
        match parent {
            Some(p) => self.node(p).map(|n| &n.children),
            None => Some(&self.roots),
        }
    }

    /// Get the children of an item in paint order, or an empty slice if the item is stale.
    pub fn children(&self, id: ItemId) -> &[ItemId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Child of `parent` (or top-level item for `None`) at `index`.
    pub fn child_at(&self, parent: Option<ItemId>, index: usize) -> Option<ItemId> {
        self.container(parent)?.get(index)
    }

    /// Index of `id` within its parent's container.
    pub fn index_in_parent(&self, id: ItemId) -> Option<usize> {
        let parent = self.node(id)?.parent;
        self.container(parent)?.index_of(id)
    }

    /// Local state of a live item.
    pub fn local(&self, id: ItemId) -> Option<&LocalItem> {
        self.node(id).map(|n| &n.local)
    }

    /// Payload of a live item.
    pub fn payload(&self, id: ItemId) -> Option<&T> {
        self.node(id).map(|n| &n.payload)
    }

    /// Mutable payload of a live item.
    pub fn payload_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.node_mut(id).map(|n| &mut n.payload)
    }

    /// Iterate live items in depth-first paint order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &T)> + '_ {
        let mut stack: Vec<ItemId> = self.roots.hit_order().collect();
        core::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = self.node(id)?;
            stack.extend(node.children.hit_order());
            Some((id, &node.payload))
        })
    }

    /// Update the local transform. Returns whether anything changed.
    pub fn set_transform(&mut self, id: ItemId, tf: Option<Transform2D>) -> bool {
        if let Some(n) = self.node_mut(id)
            && n.local.transform != tf
        {
            n.local.transform = tf;
            return true;
        }
        false
    }

    /// Update opacity, clamped to `[0, 1]`. Returns whether anything changed.
    pub fn set_opacity(&mut self, id: ItemId, opacity: f32) -> bool {
        let opacity = clamp_opacity(opacity);
        if let Some(n) = self.node_mut(id)
            && n.local.opacity != opacity
        {
            n.local.opacity = opacity;
            return true;
        }
        false
    }

    /// Update item flags. Returns whether anything changed.
    pub fn set_flags(&mut self, id: ItemId, flags: ItemFlags) -> bool {
        if let Some(n) = self.node_mut(id)
            && n.local.flags != flags
        {
            n.local.flags = flags;
            return true;
        }
        false
    }

    /// Move `id` to the top of its container. Returns its new index.
    pub fn raise(&mut self, id: ItemId) -> Result<usize, TreeError> {
        self.container_of_mut(id)?
            .raise(id)
            .ok_or(TreeError::StaleItem(id))
    }

    /// Move `id` to the bottom of its container. Returns its new index.
    pub fn lower(&mut self, id: ItemId) -> Result<usize, TreeError> {
        self.container_of_mut(id)?
            .lower(id)
            .ok_or(TreeError::StaleItem(id))
    }

    /// Restack `id` directly above its sibling `under`. Returns the new index of `id`.
    pub fn stack_above(&mut self, id: ItemId, under: ItemId) -> Result<usize, TreeError> {
        self.check_siblings(id, under)?;
        self.container_of_mut(id)?
            .stack_above(id, under)
            .ok_or(TreeError::NotSibling { item: id, anchor: under })
    }

    /// Restack `id` directly below its sibling `above`. Returns the new index of `id`.
    pub fn stack_under(&mut self, id: ItemId, above: ItemId) -> Result<usize, TreeError> {
        self.check_siblings(id, above)?;
        self.container_of_mut(id)?
            .stack_under(id, above)
            .ok_or(TreeError::NotSibling { item: id, anchor: above })
    }

    /// Map a point from `id`'s local space into its parent's space.
    pub fn map_to_parent(&self, id: ItemId, p: Point) -> Option<Point> {
        let local = self.local(id)?;
        Some(match local.transform {
            Some(tf) => tf.map_point(p),
            None => p,
        })
    }

    /// Map a point from the parent's space into `id`'s local space.
    ///
    /// Returns `None` for stale ids and degenerate transforms.
    pub fn map_from_parent(&self, id: ItemId, p: Point) -> Option<Point> {
        let local = self.local(id)?;
        match local.transform {
            Some(tf) => tf.inverse_map_point(p),
            None => Some(p),
        }
    }

    /// The transform from `id`'s local space into root-container space.
    ///
    /// Composed by walking up the ancestor chain, innermost first.
    pub fn world_transform(&self, id: ItemId) -> Option<Transform2D> {
        let mut tf = self.local(id)?.transform_or_identity();
        for ancestor in self.ancestors(id) {
            let local = self.local(ancestor)?;
            if let Some(parent_tf) = local.transform {
                tf = parent_tf * tf;
            }
        }
        Some(tf)
    }

    /// Map a point from `id`'s local space into root-container space.
    pub fn map_to_root(&self, id: ItemId, p: Point) -> Option<Point> {
        self.world_transform(id).map(|tf| tf.map_point(p))
    }

    /// Map a point from root-container space into `id`'s local space.
    pub fn map_from_root(&self, id: ItemId, p: Point) -> Option<Point> {
        self.world_transform(id)?.inverse_map_point(p)
    }

    // --- internals ---

    fn node(&self, id: ItemId) -> Option<&Node<T>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_mut(&mut self, id: ItemId) -> Option<&mut Node<T>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn container_of_mut(&mut self, id: ItemId) -> Result<&mut ItemContainer, TreeError> {
        let parent = self.node(id).ok_or(TreeError::StaleItem(id))?.parent;
        match parent {
            Some(p) => self
                .node_mut(p)
                .map(|n| &mut n.children)
                .ok_or(TreeError::StaleParent(p)),
            None => Ok(&mut self.roots),
        }
    }

    fn check_siblings(&self, id: ItemId, anchor: ItemId) -> Result<(), TreeError> {
        let a = self.node(id).ok_or(TreeError::StaleItem(id))?;
        let b = self.node(anchor).ok_or(TreeError::StaleItem(anchor))?;
        if a.parent != b.parent {
            return Err(TreeError::NotSibling { item: id, anchor });
        }
        Ok(())
    }

    fn insert_unchecked(&mut self, parent: Option<ItemId>, local: LocalItem, payload: T) -> ItemId {
        let node = |generation| Node {
            generation,
            parent: None,
            children: ItemContainer::new(),
            local,
            payload,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ItemId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ItemId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ItemId::new(idx, generation);
        self.link(id, parent);
        id
    }

    fn attach_unchecked(&mut self, parent: Option<ItemId>, detached: Detached<T>) -> ItemId {
        let Detached {
            local,
            payload,
            children,
        } = detached;
        let id = self.insert_unchecked(parent, local, payload);
        for child in children {
            self.attach_unchecked(Some(id), child);
        }
        id
    }

    /// Free `id` and its descendants. The caller has already unlinked `id` from its container.
    fn take_subtree(&mut self, id: ItemId) -> Option<Detached<T>> {
        let mut node = self.nodes.get_mut(id.idx())?.take()?;
        self.free_list.push(id.idx());
        let children = node
            .children
            .take_all()
            .into_iter()
            .filter_map(|c| self.take_subtree(c))
            .collect();
        Some(Detached {
            local: node.local,
            payload: node.payload,
            children,
        })
    }

    fn link(&mut self, id: ItemId, parent: Option<ItemId>) {
        match parent.and_then(|p| self.node_mut(p)) {
            Some(p) => {
                p.children.push(id);
            }
            None => {
                self.roots.push(id);
            }
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = parent;
        }
    }

    fn unlink(&mut self, id: ItemId) {
        let parent = self.parent_of(id);
        match parent.and_then(|p| self.node_mut(p)) {
            Some(p) => {
                p.children.remove(id);
            }
            None => {
                self.roots.remove(id);
            }
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tree_with_root() -> (ItemTree<&'static str>, ItemId) {
        let mut tree = ItemTree::new();
        let root = tree.insert_root(LocalItem::default(), "root");
        (tree, root)
    }

    #[test]
    fn insert_root_stacks_on_top() {
        let (mut tree, first) = tree_with_root();
        let second = tree.insert_root(LocalItem::default(), "second");
        assert_eq!(tree.parent_of(second), None);
        assert_eq!(tree.roots().as_slice(), &[first, second]);
        assert_eq!(tree.index_in_parent(second), Some(1));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(Some(root), LocalItem::default(), "a").unwrap();

        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        // Remove child; id becomes stale.
        let detached = tree.remove(a).unwrap();
        assert_eq!(detached.payload, "a");
        assert!(!tree.is_alive(a));

        // Insert new child; reuses the slot but the generation bumps.
        let b = tree.insert(Some(root), LocalItem::default(), "b").unwrap();
        assert_eq!(b.slot(), a.slot());
        assert_ne!(b.generation(), a.generation());
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
        assert_eq!(tree.payload(a), None);
        assert_eq!(tree.payload(b), Some(&"b"));
    }

    #[test]
    fn insert_under_stale_parent_fails() {
        let (mut tree, root) = tree_with_root();
        tree.remove(root);
        assert_eq!(
            tree.insert(Some(root), LocalItem::default(), "x"),
            Err(TreeError::StaleParent(root))
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_detaches_whole_subtree_and_keeps_local_state() {
        let (mut tree, root) = tree_with_root();
        let tf = Transform2D::translate(3.0, 4.0);
        let a = tree
            .insert(Some(root), LocalItem::with_transform(tf), "a")
            .unwrap();
        let a1 = tree.insert(Some(a), LocalItem::default(), "a1").unwrap();
        let b = tree.insert(Some(root), LocalItem::default(), "b").unwrap();
        assert_eq!(tree.len(), 4);

        let detached = tree.remove(a).unwrap();
        assert_eq!(detached.len(), 2);
        assert_eq!(detached.local.transform, Some(tf));
        assert!(!tree.is_alive(a1));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.index_in_parent(b), Some(0), "later siblings shift down");

        // Re-attach elsewhere: fresh ids, same state.
        let new_a = tree.attach(None, detached).unwrap();
        assert_ne!(new_a, a);
        assert_eq!(tree.local(new_a).unwrap().transform, Some(tf));
        assert_eq!(tree.children(new_a).len(), 1);
        assert_eq!(tree.roots().as_slice(), &[root, new_a]);
    }

    #[test]
    fn clear_detaches_in_paint_order() {
        let (mut tree, root) = tree_with_root();
        for name in ["a", "b", "c"] {
            tree.insert(Some(root), LocalItem::default(), name).unwrap();
        }
        let cleared = tree.clear(Some(root));
        let names: Vec<_> = cleared.iter().map(|d| d.payload).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.clear(None).len(), 1);
        assert!(tree.is_empty());
    }

    #[test]
    fn reparent_rejects_cycles() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(Some(root), LocalItem::default(), "a").unwrap();
        let a1 = tree.insert(Some(a), LocalItem::default(), "a1").unwrap();
        assert_eq!(
            tree.reparent(a, Some(a1)),
            Err(TreeError::WouldCycle { item: a, parent: a1 })
        );
        assert_eq!(
            tree.reparent(root, Some(root)),
            Err(TreeError::WouldCycle {
                item: root,
                parent: root
            })
        );
        tree.reparent(a1, None).unwrap();
        assert_eq!(tree.parent_of(a1), None);
        assert_eq!(tree.roots().as_slice(), &[root, a1]);
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn restacking_requires_siblings() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(Some(root), LocalItem::default(), "a").unwrap();
        let b = tree.insert(Some(root), LocalItem::default(), "b").unwrap();
        let c = tree.insert(Some(root), LocalItem::default(), "c").unwrap();
        let other = tree.insert(None, LocalItem::default(), "other").unwrap();

        assert_eq!(tree.raise(a), Ok(2));
        assert_eq!(tree.children(root), &[b, c, a]);
        assert_eq!(tree.lower(a), Ok(0));
        assert_eq!(tree.stack_above(a, c), Ok(2));
        assert_eq!(tree.children(root), &[b, c, a]);
        assert_eq!(tree.stack_under(a, b), Ok(0));
        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(
            tree.stack_above(a, other),
            Err(TreeError::NotSibling { item: a, anchor: other })
        );
    }

    #[test]
    fn ancestors_and_top_level() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(Some(root), LocalItem::default(), "a").unwrap();
        let a1 = tree.insert(Some(a), LocalItem::default(), "a1").unwrap();
        let chain: Vec<_> = tree.ancestors(a1).collect();
        assert_eq!(chain, vec![a, root]);
        assert_eq!(tree.top_level_of(a1), Some(root));
        assert_eq!(tree.top_level_of(root), Some(root));
        tree.remove(a);
        assert_eq!(tree.top_level_of(a1), None);
        assert_eq!(tree.ancestors(a1).count(), 0);
    }

    #[test]
    fn iter_is_depth_first_paint_order() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(Some(root), LocalItem::default(), "a").unwrap();
        tree.insert(Some(a), LocalItem::default(), "a1").unwrap();
        tree.insert(Some(root), LocalItem::default(), "b").unwrap();
        tree.insert(None, LocalItem::default(), "other").unwrap();
        let names: Vec<_> = tree.iter().map(|(_, name)| *name).collect();
        assert_eq!(names, vec!["root", "a", "a1", "b", "other"]);
    }

    #[test]
    fn world_transform_composes_innermost_first() {
        let mut tree = ItemTree::new();
        let outer = tree
            .insert(
                None,
                LocalItem::with_transform(Transform2D::scale(2.0, 2.0)),
                (),
            )
            .unwrap();
        let inner = tree
            .insert(
                Some(outer),
                LocalItem::with_transform(Transform2D::translate(10.0, 0.0)),
                (),
            )
            .unwrap();
        // (1, 1) in inner → (11, 1) in outer → (22, 2) in root space.
        assert_eq!(
            tree.map_to_root(inner, Point::new(1.0, 1.0)),
            Some(Point::new(22.0, 2.0))
        );
        assert_eq!(
            tree.map_from_root(inner, Point::new(22.0, 2.0)),
            Some(Point::new(1.0, 1.0))
        );
        assert_eq!(
            tree.map_to_parent(inner, Point::new(1.0, 1.0)),
            Some(Point::new(11.0, 1.0))
        );
        assert_eq!(
            tree.map_from_parent(outer, Point::new(22.0, 2.0)),
            Some(Point::new(11.0, 1.0))
        );
    }

    #[test]
    fn degenerate_transform_blocks_inverse_mapping() {
        let mut tree = ItemTree::new();
        let flat = tree
            .insert(
                None,
                LocalItem::with_transform(Transform2D::scale(0.0, 1.0)),
                (),
            )
            .unwrap();
        assert_eq!(tree.map_from_parent(flat, Point::new(1.0, 1.0)), None);
        assert_eq!(tree.map_from_root(flat, Point::new(1.0, 1.0)), None);
        assert_eq!(
            tree.map_to_parent(flat, Point::new(1.0, 1.0)),
            Some(Point::new(0.0, 1.0))
        );
    }

    #[test]
    fn setters_report_changes_and_clamp_opacity() {
        let (mut tree, root) = tree_with_root();
        assert!(!tree.set_opacity(root, 2.0), "clamps to the current 1.0");
        assert!(tree.set_opacity(root, 0.25));
        assert!(tree.set_opacity(root, f32::NAN));
        assert_eq!(tree.local(root).unwrap().opacity, 1.0);
        assert!(tree.set_opacity(root, -3.0));
        assert_eq!(tree.local(root).unwrap().opacity, 0.0);
        assert!(tree.set_flags(root, ItemFlags::VISIBLE));
        assert!(!tree.local(root).unwrap().is_pickable());
        assert!(!tree.set_flags(root, ItemFlags::VISIBLE));
        let tf = Some(Transform2D::translate(1.0, 1.0));
        assert!(tree.set_transform(root, tf));
        assert!(!tree.set_transform(root, tf));
        tree.remove(root);
        assert!(!tree.set_transform(root, None));
    }
}
