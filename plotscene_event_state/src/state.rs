// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rolling pointer state with hover and capture tracking.

use kurbo::Point;

use crate::event::{Modifiers, MouseButton, MouseEvent, ScreenPos};

/// Result of a hover update: at most one leave and one enter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HoverTransition<K> {
    /// Item the pointer left, if any.
    pub leave: Option<K>,
    /// Item the pointer entered, if any.
    pub enter: Option<K>,
}

impl<K> HoverTransition<K> {
    /// A transition that changes nothing.
    pub const fn none() -> Self {
        Self {
            leave: None,
            enter: None,
        }
    }

    /// Whether the hovered item stayed the same.
    pub fn is_empty(&self) -> bool {
        self.leave.is_none() && self.enter.is_none()
    }
}

/// The rolling record of pointer input for one scene.
///
/// Tracks current and previous positions (scene and screen space), the
/// pressed button, modifiers, and two non-owning references: the item under
/// the pointer (`hovered`) and the item that received the last press
/// (`captured`). `K` is usually a generational id, so the owner can drop
/// references to removed items with [`EventState::retain`].
///
/// ```
/// use kurbo::Point;
/// use plotscene_event_state::{EventState, MouseButton, ScreenPos};
///
/// let mut state: EventState<u32> = EventState::new();
/// state.begin(ScreenPos::new(5, 5), Point::new(5.0, 5.0));
/// let t = state.set_hovered(Some(7));
/// assert_eq!(t.enter, Some(7));
///
/// state.capture(Some(7), MouseButton::Left);
/// assert_eq!(state.captured(), Some(7));
/// assert_eq!(state.release(), Some(7));
/// assert_eq!(state.button(), MouseButton::None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventState<K> {
    mouse: MouseEvent,
    hovered: Option<K>,
    captured: Option<K>,
}

impl<K: Copy + PartialEq> EventState<K> {
    /// Create an idle state at the origin.
    pub fn new() -> Self {
        Self {
            mouse: MouseEvent::default(),
            hovered: None,
            captured: None,
        }
    }

    /// The current pointer record. `pos`/`last_pos` mirror scene space here;
    /// receivers get localized copies.
    pub fn mouse(&self) -> &MouseEvent {
        &self.mouse
    }

    /// Record a new current position, keeping the previous one as "last".
    pub fn begin(&mut self, screen: ScreenPos, scene: Point) {
        self.mouse.screen_pos = screen;
        self.mouse.scene_pos = scene;
        self.mouse.pos = scene;
    }

    /// Copy the current position into the "last" fields.
    ///
    /// Called after a move has been dispatched, and before a press is
    /// dispatched so the press carries a zero delta.
    pub fn commit_last(&mut self) {
        self.mouse.last_screen_pos = self.mouse.screen_pos;
        self.mouse.last_scene_pos = self.mouse.scene_pos;
        self.mouse.last_pos = self.mouse.pos;
    }

    /// Currently pressed button.
    pub fn button(&self) -> MouseButton {
        self.mouse.button
    }

    /// Set the pressed button.
    pub fn set_button(&mut self, button: MouseButton) {
        self.mouse.button = button;
    }

    /// Currently held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.mouse.modifiers
    }

    /// Set the held modifiers.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.mouse.modifiers = modifiers;
    }

    /// Item currently under the pointer.
    pub fn hovered(&self) -> Option<K> {
        self.hovered
    }

    /// Item that holds the pointer capture.
    pub fn captured(&self) -> Option<K> {
        self.captured
    }

    /// Update the hovered item and report the transition.
    ///
    /// Nothing is reported when `new` equals the current hovered item, so an
    /// item never sees two enters in a row.
    pub fn set_hovered(&mut self, new: Option<K>) -> HoverTransition<K> {
        if new == self.hovered {
            return HoverTransition::none();
        }
        let leave = core::mem::replace(&mut self.hovered, new);
        HoverTransition { leave, enter: new }
    }

    /// Capture the pointer for `item` while `button` is held.
    pub fn capture(&mut self, item: Option<K>, button: MouseButton) {
        self.captured = item;
        self.mouse.button = button;
    }

    /// Release the capture and the button. Returns the previously captured item.
    pub fn release(&mut self) -> Option<K> {
        self.mouse.button = MouseButton::None;
        self.captured.take()
    }

    /// Drop hovered/captured references that no longer satisfy `alive`.
    ///
    /// A dropped capture also resets the button, as if it had been released.
    pub fn retain(&mut self, alive: impl Fn(&K) -> bool) {
        if self.hovered.as_ref().is_some_and(|k| !alive(k)) {
            self.hovered = None;
        }
        if self.captured.as_ref().is_some_and(|k| !alive(k)) {
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_leave_pairing() {
        let mut state: EventState<u32> = EventState::new();
        assert!(state.set_hovered(None).is_empty());
        let t = state.set_hovered(Some(1));
        assert_eq!(t, HoverTransition { leave: None, enter: Some(1) });
        assert!(state.set_hovered(Some(1)).is_empty(), "no duplicate enter");
        let t = state.set_hovered(Some(2));
        assert_eq!(t, HoverTransition { leave: Some(1), enter: Some(2) });
        let t = state.set_hovered(None);
        assert_eq!(t, HoverTransition { leave: Some(2), enter: None });
    }

    #[test]
    fn last_position_lags_until_committed() {
        let mut state: EventState<u32> = EventState::new();
        state.begin(ScreenPos::new(1, 2), Point::new(1.0, 2.0));
        state.commit_last();
        state.begin(ScreenPos::new(4, 6), Point::new(4.0, 6.0));
        let m = state.mouse();
        assert_eq!(m.last_screen_pos, ScreenPos::new(1, 2));
        assert_eq!(m.scene_delta(), kurbo::Vec2::new(3.0, 4.0));
        state.commit_last();
        assert_eq!(state.mouse().last_scene_pos, Point::new(4.0, 6.0));
        assert_eq!(state.mouse().scene_delta(), kurbo::Vec2::ZERO);
    }

    #[test]
    fn retain_drops_stale_references() {
        let mut state: EventState<u32> = EventState::new();
        state.set_hovered(Some(3));
        state.capture(Some(4), MouseButton::Right);
        state.retain(|&k| k != 4);
        assert_eq!(state.hovered(), Some(3));
        assert_eq!(state.captured(), None);
        assert_eq!(state.button(), MouseButton::None);
        state.retain(|_| false);
        assert_eq!(state.hovered(), None);
    }
}
