// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ItemId;

/// Structural misuse of an [`ItemTree`](crate::ItemTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The item id is stale or was never issued by this tree.
    #[error("item {0:?} is not alive in this tree")]
    StaleItem(ItemId),
    /// The requested parent is stale or was never issued by this tree.
    #[error("parent {0:?} is not alive in this tree")]
    StaleParent(ItemId),
    /// Reparenting would make an item its own ancestor.
    #[error("moving {item:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// Item being moved.
        item: ItemId,
        /// Requested new parent.
        parent: ItemId,
    },
    /// A restacking anchor does not share the item's container.
    #[error("{anchor:?} is not a sibling of {item:?}")]
    NotSibling {
        /// Item being restacked.
        item: ItemId,
        /// Anchor it was stacked against.
        anchor: ItemId,
    },
}
