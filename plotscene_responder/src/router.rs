// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Builds the responder chain for one resolved target: the target itself, then
//! every ancestor up to the top level.
//!
//! ## Localization
//!
//! - The target entry carries the points it was given.
//! - Each bubble entry carries the previous entry's points mapped through
//!   [`Hierarchy::map_to_parent`], so every handler sees its own local space.
//! - If a mapping fails (the node left the tree), the chain ends there.

use kurbo::Point;
use smallvec::SmallVec;

use crate::types::{Dispatch, Hierarchy};

/// Chain storage. Chart scenes are rarely deeper than a handful of levels.
pub type DispatchChain<K> = SmallVec<[Dispatch<K>; 8]>;

/// Responder chain router over a [`Hierarchy`].
///
/// ## Usage
///
/// - Construct with [`Router::new`] around anything implementing [`Hierarchy`]
///   (a reference works too).
/// - Call [`Router::bubble`] with the picked target and its local points.
/// - Run the chain with [`dispatcher::run`](crate::dispatcher::run).
#[derive(Clone, Debug)]
pub struct Router<H> {
    hierarchy: H,
}

impl<H> Router<H> {
    /// Create a router over `hierarchy`.
    pub fn new(hierarchy: H) -> Self {
        Self { hierarchy }
    }

    /// The underlying hierarchy.
    pub fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    /// Emit the target → bubble sequence for `target`.
    ///
    /// `pos` and `last_pos` must already be in `target`'s local space.
    pub fn bubble<K: Copy>(&self, target: K, pos: Point, last_pos: Point) -> DispatchChain<K>
    where
        H: Hierarchy<K>,
    {
        let mut out = DispatchChain::new();
        out.push(Dispatch::target(target, pos, last_pos));
        let (mut node, mut pos, mut last_pos) = (target, pos, last_pos);
        while let Some(parent) = self.hierarchy.parent_of(&node) {
            let (Some(p), Some(lp)) = (
                self.hierarchy.map_to_parent(&node, pos),
                self.hierarchy.map_to_parent(&node, last_pos),
            ) else {
                break;
            };
            out.push(Dispatch::bubble(parent, p, lp));
            (node, pos, last_pos) = (parent, p, lp);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use kurbo::Vec2;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Node(u32);

    /// Chain 3 → 2 → 1; each level offsets its child by (10, 0). Node 9 is detached.
    struct Chain;

    impl Hierarchy<Node> for Chain {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                9 => Some(Node(1)),
                _ => None,
            }
        }

        fn map_to_parent(&self, node: &Node, point: Point) -> Option<Point> {
            (node.0 != 9).then(|| point + Vec2::new(10.0, 0.0))
        }
    }

    #[test]
    fn target_then_ancestors_in_order() {
        let router = Router::new(Chain);
        let seq = router.bubble(Node(3), Point::new(1.0, 1.0), Point::new(0.0, 1.0));
        let phases: SmallVec<[(Phase, u32); 4]> = seq.iter().map(|d| (d.phase, d.node.0)).collect();
        assert_eq!(
            phases.as_slice(),
            &[(Phase::Target, 3), (Phase::Bubble, 2), (Phase::Bubble, 1)]
        );
    }

    #[test]
    fn points_are_localized_per_level() {
        let router = Router::new(&Chain);
        let seq = router.bubble(Node(3), Point::new(1.0, 1.0), Point::new(0.0, 1.0));
        assert_eq!(seq[0].pos, Point::new(1.0, 1.0));
        assert_eq!(seq[1].pos, Point::new(11.0, 1.0));
        assert_eq!(seq[2].pos, Point::new(21.0, 1.0));
        assert_eq!(seq[2].last_pos, Point::new(20.0, 1.0));
    }

    #[test]
    fn top_level_target_is_a_singleton() {
        let seq = Router::new(Chain).bubble(Node(1), Point::ZERO, Point::ZERO);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].phase, Phase::Target);
    }

    #[test]
    fn failed_mapping_truncates_chain() {
        let seq = Router::new(Chain).bubble(Node(9), Point::ZERO, Point::ZERO);
        assert_eq!(seq.len(), 1);
    }
}
