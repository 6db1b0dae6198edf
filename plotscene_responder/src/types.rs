// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for responder chains.

use kurbo::Point;

/// Where in the chain a dispatch entry sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The item the event was resolved to.
    Target,
    /// An ancestor receiving an event its descendants did not consume.
    Bubble,
}

/// What a handler did with an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Not handled; offer it to the next entry.
    Continue,
    /// Handled; stop propagation.
    Consumed,
}

impl From<bool> for Outcome {
    fn from(consumed: bool) -> Self {
        if consumed {
            Self::Consumed
        } else {
            Self::Continue
        }
    }
}

/// A single dispatch step.
///
/// `pos` and `last_pos` are already expressed in `node`'s local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Receiving node.
    pub node: K,
    /// Current pointer position in `node`'s space.
    pub pos: Point,
    /// Previous pointer position in `node`'s space.
    pub last_pos: Point,
}

impl<K> Dispatch<K> {
    /// Target entry.
    pub fn target(node: K, pos: Point, last_pos: Point) -> Self {
        Self {
            phase: Phase::Target,
            node,
            pos,
            last_pos,
        }
    }

    /// Bubble entry.
    pub fn bubble(node: K, pos: Point, last_pos: Point) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
            pos,
            last_pos,
        }
    }
}

/// Parent links and parent-ward point mapping for a tree of nodes.
pub trait Hierarchy<K> {
    /// Parent of `node`, or `None` for a top-level node.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Re-express `point` from `node`'s space in its parent's space.
    ///
    /// Returns `None` when `node` is no longer part of the tree.
    fn map_to_parent(&self, node: &K, point: Point) -> Option<Point>;
}

impl<K, H: Hierarchy<K> + ?Sized> Hierarchy<K> for &H {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }

    fn map_to_parent(&self, node: &K, point: Point) -> Option<Point> {
        (**self).map_to_parent(node, point)
    }
}
