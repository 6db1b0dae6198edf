// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence until a handler consumes the event.
//!
//! ## Semantics
//!
//! - Entries are processed in order (target first, then ancestors nearest first).
//! - [`Outcome::Consumed`] stops propagation immediately.
//! - The return value is the consuming entry, or `None` when the event fell
//!   off the top of the chain.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use plotscene_responder::dispatcher;
//! use plotscene_responder::types::{Dispatch, Outcome};
//!
//! let seq = [
//!     Dispatch::target(3_u32, Point::ZERO, Point::ZERO),
//!     Dispatch::bubble(2_u32, Point::ZERO, Point::ZERO),
//!     Dispatch::bubble(1_u32, Point::ZERO, Point::ZERO),
//! ];
//!
//! let mut seen = Vec::new();
//! let eaten_by = dispatcher::run(&seq, |d| {
//!     seen.push(d.node);
//!     Outcome::from(d.node == 2)
//! });
//! assert_eq!(eaten_by.map(|d| d.node), Some(2));
//! assert_eq!(seen, [3, 2]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence until one consumes the event.
///
/// Returns the consuming entry, or `None` if every handler returned
/// [`Outcome::Continue`].
pub fn run<'a, K>(
    seq: &'a [Dispatch<K>],
    mut handler: impl FnMut(&Dispatch<K>) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    seq.iter().find(|d| handler(d) == Outcome::Consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn mk_seq() -> [Dispatch<u32>; 3] {
        [
            Dispatch::target(3, Point::ZERO, Point::ZERO),
            Dispatch::bubble(2, Point::ZERO, Point::ZERO),
            Dispatch::bubble(1, Point::ZERO, Point::ZERO),
        ]
    }

    #[test]
    fn continue_through_all() {
        let seq = mk_seq();
        let mut visited = 0;
        let stopped = run(&seq, |_| {
            visited += 1;
            Outcome::Continue
        });
        assert!(stopped.is_none());
        assert_eq!(visited, seq.len());
    }

    #[test]
    fn target_consumes_and_ancestors_are_skipped() {
        let seq = mk_seq();
        let mut visited = 0;
        let stopped = run(&seq, |_| {
            visited += 1;
            Outcome::Consumed
        });
        assert_eq!(stopped.map(|d| d.node), Some(3));
        assert_eq!(visited, 1);
    }

    #[test]
    fn empty_sequence() {
        let seq: [Dispatch<u32>; 0] = [];
        assert!(run(&seq, |_| Outcome::Consumed).is_none());
    }
}
