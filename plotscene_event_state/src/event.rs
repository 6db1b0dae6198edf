// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard event records delivered to items.

use kurbo::{Point, Vec2};

/// Mouse button identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// No button is held.
    #[default]
    None,
    /// Primary button.
    Left,
    /// Middle button or wheel press.
    Middle,
    /// Secondary button.
    Right,
}

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt/Option key.
        const ALT     = 0b0000_0100;
    }
}

/// Integer pixel position in screen space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenPos {
    /// Horizontal pixel.
    pub x: i32,
    /// Vertical pixel.
    pub y: i32,
}

impl ScreenPos {
    /// Create a screen position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The same position as a floating-point point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Centre of the pixel, which covers `[x, x + 1) × [y, y + 1)`.
    ///
    /// Hit testing samples here, matching how an id pass rasterizes.
    pub fn pixel_center(self) -> Point {
        Point::new(f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }
}

impl From<(i32, i32)> for ScreenPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A pointer event as seen by one item.
///
/// `pos` and `last_pos` are expressed in the receiving item's local space and
/// are rewritten at each level when an event bubbles to a parent. The scene
/// and screen positions are shared by every receiver.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MouseEvent {
    /// Current position in the receiving item's local space.
    pub pos: Point,
    /// Previous position in the receiving item's local space.
    pub last_pos: Point,
    /// Current position in scene space.
    pub scene_pos: Point,
    /// Previous position in scene space.
    pub last_scene_pos: Point,
    /// Current position in screen pixels.
    pub screen_pos: ScreenPos,
    /// Previous position in screen pixels.
    pub last_screen_pos: ScreenPos,
    /// Button held or changed by this event.
    pub button: MouseButton,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Movement since the previous event in the receiver's local space.
    pub fn delta(&self) -> Vec2 {
        self.pos - self.last_pos
    }

    /// Movement since the previous event in scene space.
    pub fn scene_delta(&self) -> Vec2 {
        self.scene_pos - self.last_scene_pos
    }

    /// A copy with local positions replaced.
    #[must_use]
    pub fn localized(&self, pos: Point, last_pos: Point) -> Self {
        Self {
            pos,
            last_pos,
            ..*self
        }
    }
}

/// Keys the scene distinguishes without a platform keymap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// Escape.
    Escape,
    /// Enter/Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
}

/// A key identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a character.
    Character(char),
    /// A non-character key.
    Named(NamedKey),
}

/// A keyboard event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key pressed or released.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Pointer position when the key event occurred.
    pub screen_pos: ScreenPos,
}

impl KeyEvent {
    /// A key event with no modifiers at the origin. The scene fills in the pointer position.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            screen_pos: ScreenPos::new(0, 0),
        }
    }

    /// A key event for a character key.
    pub const fn character(c: char) -> Self {
        Self::new(Key::Character(c))
    }

    /// Builder-style modifier setter.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_center_is_inside_the_pixel() {
        let pos = ScreenPos::new(10, -3);
        assert_eq!(pos.to_point(), Point::new(10.0, -3.0));
        assert_eq!(pos.pixel_center(), Point::new(10.5, -2.5));
    }
}
