// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the item tree: identifiers, flags, and local state.

use crate::Transform2D;

/// Identifier for an item in the tree (generational).
///
/// An `ItemId` never dangles: once its item is removed, the slot's generation
/// is bumped and the id is reported as stale by [`ItemTree::is_alive`](crate::ItemTree::is_alive),
/// even if the slot is later reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(pub(crate) u32, pub(crate) u32);

impl ItemId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index, stable for the lifetime of the item.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of the slot when this id was issued.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Item flags controlling visibility and input.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Item is painted and may be picked.
        const VISIBLE     = 0b0000_0001;
        /// Item participates in picking and receives pointer input.
        const INTERACTIVE = 0b0000_0010;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}

/// Per-item state owned by the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalItem {
    /// Transform from item-local space to parent space. `None` means identity.
    pub transform: Option<Transform2D>,
    /// Opacity in `[0, 1]`, multiplied with the ancestors' opacity at paint time.
    pub opacity: f32,
    /// Visibility and input flags.
    pub flags: ItemFlags,
}

impl Default for LocalItem {
    fn default() -> Self {
        Self {
            transform: None,
            opacity: 1.0,
            flags: ItemFlags::default(),
        }
    }
}

impl LocalItem {
    /// Local state with the given transform and default flags.
    pub fn with_transform(transform: Transform2D) -> Self {
        Self {
            transform: Some(transform),
            ..Self::default()
        }
    }

    /// The effective transform (identity when unset).
    pub fn transform_or_identity(&self) -> Transform2D {
        self.transform.unwrap_or(Transform2D::IDENTITY)
    }

    /// Whether the item is visible.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(ItemFlags::VISIBLE)
    }

    /// Whether the item can be picked: visible and interactive.
    pub fn is_pickable(&self) -> bool {
        self.flags.contains(ItemFlags::VISIBLE | ItemFlags::INTERACTIVE)
    }
}

pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}
