// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use plotscene_tree::{ItemId, TreeError};

/// Structural misuse of a [`Scene`](crate::Scene).
///
/// Runtime conditions such as off-screen clicks or stale hover references are
/// never errors; they show up as `false`, `-1`, or `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The item tree rejected the operation.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The item exists but is not of the requested type.
    #[error("item {item:?} is not a `{expected}`")]
    WrongType {
        /// The item.
        item: ItemId,
        /// Name of the requested type.
        expected: &'static str,
    },
}
