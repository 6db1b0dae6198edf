// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotscene: the interactive scene graph underneath a 2D chart.
//!
//! A [`Scene`] owns a tree of [`Item`]s (axes, plots, legends, chart containers), each with its
//! own local transform, and does three jobs with it:
//!
//! - **Paint**: items are painted depth-first in container order through a [`Painter`] device,
//!   under a transform stack and with inherited opacity.
//! - **Pick**: a screen position resolves to the topmost item under it, sampled at the pixel
//!   centre. When the device supports it, each pickable top-level subtree is drawn once as a flat
//!   24-bit id color and read back, so the top-level candidate is an O(1) lookup; the hit is then
//!   refined to the deepest child with [`Item::hit_test`]. Otherwise the tree is hit-tested
//!   directly, children before parents. Both strategies resolve to the same item.
//! - **Dispatch**: pointer input is routed with hover (enter/leave) tracking, pointer capture from
//!   press to release, and bubbling of unconsumed events to ancestors with the position
//!   re-expressed in each receiver's local space.
//!
//! Dirty tracking ties it together: every structural or visual mutation made through the scene
//! marks it dirty and invalidates the picking buffer; a completed paint marks it clean.
//!
//! ## Crates
//!
//! The pieces live in their own crates and are re-exported here:
//! - [`plotscene_tree`]: the item arena, containers, transforms, and coordinate mapping.
//! - [`plotscene_event_state`]: event records, hover/capture state, and multi-click detection.
//! - [`plotscene_picking`]: id encoding and the picking buffer.
//! - [`plotscene_responder`]: the bubbling chain.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use peniko::Color;
//! use plotscene::{
//!     EventContext, Item, LocalItem, MouseButton, MouseEvent, PaintContext, Painter, Scene,
//!     ScreenPos, SoftwareDevice, Transform2D,
//! };
//!
//! #[derive(Default)]
//! struct Panel {
//!     size: f64,
//!     last_press: Option<Point>,
//! }
//!
//! impl Item for Panel {
//!     fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
//!         let rect = Rect::new(0.0, 0.0, self.size, self.size);
//!         painter.fill_rect(rect, cx.apply_opacity(Color::from_rgb8(200, 200, 200)));
//!         true
//!     }
//!     fn bounds(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, self.size, self.size))
//!     }
//!     fn button_press(&mut self, event: &MouseEvent, _: &mut EventContext) -> bool {
//!         self.last_press = Some(event.pos);
//!         true
//!     }
//! }
//!
//! let mut scene = Scene::new(SoftwareDevice::new());
//! scene.set_geometry(200, 200);
//! let outer = scene.add_item(Panel { size: 100.0, ..Panel::default() });
//! let inner = scene
//!     .add_item_with(
//!         Some(outer),
//!         LocalItem::with_transform(Transform2D::translate(10.0, 10.0)),
//!         Panel { size: 20.0, ..Panel::default() },
//!     )
//!     .unwrap();
//!
//! assert!(scene.button_press(MouseButton::Left, ScreenPos::new(15, 15)));
//! let inner = scene.downcast_item::<Panel>(inner).unwrap();
//! assert_eq!(inner.last_press, Some(Point::new(5.0, 5.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod item;
mod painter;
mod scene;
mod software;

pub use context::{EventContext, PaintContext};
pub use error::SceneError;
pub use item::Item;
pub use painter::Painter;
pub use scene::{BoxedItem, Scene, SceneConfig};
pub use software::{DrawOp, SoftwareDevice};

pub use plotscene_event_state::{
    ClickCounter, EventState, HoverTransition, Key, KeyEvent, Modifiers, MouseButton, MouseEvent,
    NamedKey, ScreenPos,
};
pub use plotscene_picking::{MAX_ID, NO_ITEM, PickingBuffer};
pub use plotscene_tree::{
    Detached, ItemContainer, ItemFlags, ItemId, ItemTree, LocalItem, Transform2D, TreeError,
};

pub use plotscene_event_state;
pub use plotscene_picking;
pub use plotscene_responder;
pub use plotscene_tree;
