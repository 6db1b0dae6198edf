// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotscene Event State: pointer and keyboard state for a 2D chart scene.
//!
//! - [`MouseEvent`] and [`KeyEvent`]: the records handed to items. Mouse events carry the
//!   position in the receiver's local space plus the shared scene and screen positions.
//! - [`EventState`]: current and previous pointer positions, pressed button, modifiers, and the
//!   hovered and captured item references.
//! - [`ClickCounter`]: turns a stream of presses into repeat counts for double-click detection.
//!
//! The item reference type `K` is generic; the `plotscene` crate uses generational item ids so
//! that a removed item is recognised as gone.
//!
//! This crate is `no_std`.

#![no_std]

mod click;
mod event;
mod state;

pub use click::{ClickCounter, DEFAULT_CLICK_DISTANCE, DEFAULT_CLICK_INTERVAL};
pub use event::{Key, KeyEvent, Modifiers, MouseButton, MouseEvent, NamedKey, ScreenPos};
pub use state::{EventState, HoverTransition};
