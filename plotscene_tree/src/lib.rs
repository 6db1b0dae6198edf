// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotscene Tree: the item hierarchy underneath a 2D chart scene.
//!
//! - Represents a hierarchy of items with local transforms, opacity, and visibility/input flags.
//! - Keeps children in ordered [`ItemContainer`]s: index order is paint order, and the reverse is
//!   hit-test order.
//! - Hands out generational [`ItemId`]s, so references held elsewhere (hover, capture) are
//!   detected as stale instead of dangling.
//! - Maps points between an item's local space, its parent's space, and root-container space.
//!
//! This crate does not paint, pick, or route events. The `plotscene` crate builds those on top.
//!
//! ## API overview
//!
//! - [`ItemTree`]: arena of items carrying a caller-defined payload.
//! - [`ItemContainer`]: ordered children of one parent (or of the root).
//! - [`LocalItem`]: per-item transform, opacity, and [`ItemFlags`].
//! - [`Transform2D`]: affine transform with non-panicking inverse mapping.
//! - [`Detached`]: a removed subtree, ready to be attached again.
//!
//! Key operations:
//! - [`ItemTree::insert`] / [`ItemTree::attach`] / [`ItemTree::remove`] / [`ItemTree::clear`]
//! - [`ItemTree::raise`] / [`ItemTree::lower`] / [`ItemTree::stack_above`] /
//!   [`ItemTree::stack_under`]
//! - [`ItemTree::map_to_parent`] / [`ItemTree::map_from_parent`] /
//!   [`ItemTree::map_to_root`] / [`ItemTree::map_from_root`]
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod container;
mod error;
mod transform;
mod tree;
mod types;
mod util;

pub use container::ItemContainer;
pub use error::TreeError;
pub use transform::Transform2D;
pub use tree::{Detached, ItemTree};
pub use types::{ItemFlags, ItemId, LocalItem};
pub use util::transform_rect_bbox;
