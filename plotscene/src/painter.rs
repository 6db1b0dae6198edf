// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface items paint into.

use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Rect};
use peniko::Color;

/// A rendering device.
///
/// Drawing goes through a transform stack: [`Painter::push_transform`]
/// concatenates onto the current transform and [`Painter::pop_transform`]
/// restores the previous one.
///
/// Devices that can render flat id colors and read them back advertise it
/// through [`Painter::supports_buffer_id`]. Between
/// [`Painter::begin_buffer_id_mode`] and [`Painter::end_buffer_id_mode`], every
/// fill and stroke writes the id last passed to [`Painter::set_buffer_id`]
/// instead of its color. The defaults describe a device without that capability.
pub trait Painter {
    /// Concatenate `affine` onto the current transform.
    fn push_transform(&mut self, affine: Affine);

    /// Restore the transform active before the matching push.
    fn pop_transform(&mut self);

    /// Fill an axis-aligned rectangle in current-transform space.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a path (non-zero winding).
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke a path with the given line width.
    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color);

    /// Whether this device can run an id pass.
    fn supports_buffer_id(&self) -> bool {
        false
    }

    /// Start an id pass over a `width` x `height` target cleared to the background id.
    fn begin_buffer_id_mode(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Id written by subsequent draws in the id pass.
    fn set_buffer_id(&mut self, id: u32) {
        let _ = id;
    }

    /// Finish the id pass.
    fn end_buffer_id_mode(&mut self) {}

    /// Read the last id pass back into `out` (row-major, one id per pixel).
    ///
    /// Returns `false` if there is nothing to read.
    fn read_buffer_ids(&mut self, out: &mut Vec<u32>) -> bool {
        let _ = out;
        false
    }
}
