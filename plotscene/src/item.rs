// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The behaviour every scene item implements.

use core::any::Any;

use kurbo::Rect;
use plotscene_event_state::{KeyEvent, MouseEvent};

use crate::context::{EventContext, PaintContext};
use crate::painter::Painter;

/// A drawable, interactive node in a [`Scene`](crate::Scene).
///
/// Structure (parent, children, transform, opacity, flags) lives in the scene's
/// tree; this trait only carries behaviour. Every position an item receives is
/// already in its own local space, and the painter's current transform maps
/// that space to the device.
///
/// Handlers return `true` when they consume the event. Unconsumed press,
/// release, move, double-click and wheel events bubble to the parent.
/// All handlers default to "not consumed".
///
/// ```
/// use kurbo::Rect;
/// use peniko::Color;
/// use plotscene::{EventContext, Item, MouseEvent, PaintContext, Painter};
///
/// struct Swatch {
///     rect: Rect,
///     clicks: u32,
/// }
///
/// impl Item for Swatch {
///     fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
///         painter.fill_rect(self.rect, cx.apply_opacity(Color::from_rgb8(40, 120, 200)));
///         true
///     }
///
///     fn bounds(&self) -> Option<Rect> {
///         Some(self.rect)
///     }
///
///     fn button_press(&mut self, _: &MouseEvent, cx: &mut EventContext) -> bool {
///         self.clicks += 1;
///         cx.request_repaint();
///         true
///     }
/// }
/// ```
pub trait Item: Any {
    /// Paint this item. Children are painted by the scene afterwards, on top.
    ///
    /// Returns whether anything was drawn.
    fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool;

    /// Local-space bounds used by the default [`Item::hit_test`].
    fn bounds(&self) -> Option<Rect> {
        None
    }

    /// Whether `event.pos` (local space) lies on this item.
    fn hit_test(&self, event: &MouseEvent) -> bool {
        self.bounds().is_some_and(|b| b.contains(event.pos))
    }

    /// The pointer started hovering this item. Not bubbled.
    fn mouse_enter(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// The pointer moved over (or, while captured, away from) this item.
    fn mouse_move(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// The pointer stopped hovering this item. Not bubbled.
    fn mouse_leave(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// A button was pressed over this item.
    fn button_press(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// A button was released while this item held the capture.
    fn button_release(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// A repeated press over this item.
    fn double_click(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// The wheel turned over this item. Positive `delta` is away from the user.
    fn wheel(&mut self, event: &MouseEvent, delta: f64, cx: &mut EventContext) -> bool {
        let _ = (event, delta, cx);
        false
    }

    /// A key was pressed with the pointer over this item. Not bubbled.
    fn key_press(&mut self, event: &KeyEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }

    /// A key was released with the pointer over this item. Not bubbled.
    fn key_release(&mut self, event: &KeyEvent, cx: &mut EventContext) -> bool {
        let _ = (event, cx);
        false
    }
}
