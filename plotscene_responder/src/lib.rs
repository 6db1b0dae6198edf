// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotscene Responder: a `no_std` bubbling chain for chart events.
//!
//! ## Overview
//!
//! This crate builds the responder chain for one event: the resolved target, then each ancestor
//! in turn, with the pointer re-expressed in every receiver's local space.
//! It does not perform hit testing. The caller picks the target and hands over its local points.
//!
//! ## Workflow
//!
//! 1) Pick a target (geometrically or through an id buffer).
//! 2) Route: [`Router::bubble`](crate::router::Router::bubble) walks parent links through a
//!    [`Hierarchy`](crate::types::Hierarchy) and emits a target → bubble sequence.
//! 3) Dispatch: [`dispatcher::run`] calls your handler per entry until one returns
//!    [`Outcome::Consumed`](crate::types::Outcome::Consumed).
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use plotscene_responder::{dispatcher, Router};
//! use plotscene_responder::types::{Hierarchy, Outcome};
//!
//! // Node 2 sits inside node 1, offset by (10, 10).
//! struct Tree;
//! impl Hierarchy<u32> for Tree {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node == 2).then_some(1)
//!     }
//!     fn map_to_parent(&self, _: &u32, p: Point) -> Option<Point> {
//!         Some(p + Vec2::new(10.0, 10.0))
//!     }
//! }
//!
//! let seq = Router::new(Tree).bubble(2, Point::new(5.0, 5.0), Point::new(5.0, 5.0));
//! let eaten_by = dispatcher::run(&seq, |d| Outcome::from(d.node == 1));
//! assert_eq!(eaten_by.map(|d| d.pos), Some(Point::new(15.0, 15.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod dispatcher;
pub mod router;
pub mod types;

pub use router::{DispatchChain, Router};
pub use types::{Dispatch, Hierarchy, Outcome, Phase};
