// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A CPU device for tests and headless use.
//!
//! In normal mode the device records every call together with the transform
//! it was issued under. It does not rasterize colors.
//!
//! In id mode it rasterizes fills and strokes into a 24-bit RGB id target by
//! sampling pixel centres, so picking can be exercised without a GPU.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, ParamCurveNearest, Point, Rect, Shape};
use peniko::Color;
use plotscene_picking::{NO_ITEM, decode_id, encode_id};
use plotscene_tree::transform_rect_bbox;

use crate::painter::Painter;

/// A recorded drawing call.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// A transform was pushed; `transform` is the resulting current transform.
    PushTransform {
        /// Current transform after the push.
        transform: Affine,
    },
    /// A transform was popped.
    PopTransform,
    /// Rectangle fill.
    FillRect {
        /// Rectangle in local space.
        rect: Rect,
        /// Fill color.
        color: Color,
        /// Transform active when drawn.
        transform: Affine,
    },
    /// Path fill.
    FillPath {
        /// Path in local space.
        path: BezPath,
        /// Fill color.
        color: Color,
        /// Transform active when drawn.
        transform: Affine,
    },
    /// Path stroke.
    StrokePath {
        /// Path in local space.
        path: BezPath,
        /// Line width in local units.
        width: f64,
        /// Stroke color.
        color: Color,
        /// Transform active when drawn.
        transform: Affine,
    },
}

#[derive(Clone, Debug, Default)]
struct IdTarget {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

/// Reference [`Painter`] that records operations and rasterizes id passes.
#[derive(Clone, Debug)]
pub struct SoftwareDevice {
    transform: Affine,
    stack: Vec<Affine>,
    ops: Vec<DrawOp>,
    buffer_id: bool,
    id_mode: bool,
    id_color: [u8; 3],
    ids: IdTarget,
}

impl Default for SoftwareDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareDevice {
    /// A device with id-pass support.
    pub fn new() -> Self {
        Self {
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            ops: Vec::new(),
            buffer_id: true,
            id_mode: false,
            id_color: encode_id(NO_ITEM),
            ids: IdTarget::default(),
        }
    }

    /// A device that reports no id-pass support, forcing geometric picking.
    pub fn without_buffer_id() -> Self {
        Self {
            buffer_id: false,
            ..Self::new()
        }
    }

    /// Operations recorded in normal mode.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Depth of the transform stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether an id pass is in progress.
    pub fn in_buffer_id_mode(&self) -> bool {
        self.id_mode
    }

    /// Id at pixel `(x, y)` from the last id pass.
    pub fn id_at(&self, x: u32, y: u32) -> u32 {
        if x >= self.ids.width || y >= self.ids.height {
            return NO_ITEM;
        }
        let i = y as usize * self.ids.width as usize + x as usize;
        self.ids.pixels.get(i).map_or(NO_ITEM, |&rgb| decode_id(rgb))
    }

    /// Write the current id into every pixel whose centre passes `inside`.
    ///
    /// `bounds` is a conservative local-space bound of the shape.
    fn raster(&mut self, bounds: Rect, inside: impl Fn(Point) -> bool) {
        let det = self.transform.determinant();
        if !det.is_finite() || det == 0.0 || self.ids.pixels.is_empty() {
            return;
        }
        let inverse = self.transform.inverse();
        let device = transform_rect_bbox(self.transform, bounds).expand();
        let (width, height) = (f64::from(self.ids.width), f64::from(self.ids.height));
        let x0 = device.x0.max(0.0);
        let y0 = device.y0.max(0.0);
        let x1 = device.x1.min(width);
        let y1 = device.y1.min(height);
        if !(x0 < x1 && y0 < y1) {
            return;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "bounds are integral and clamped to the id target"
        )]
        let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);
        let stride = self.ids.width as usize;
        for y in y0..y1 {
            for x in x0..x1 {
                let centre = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if inside(inverse * centre) {
                    self.ids.pixels[y as usize * stride + x as usize] = self.id_color;
                }
            }
        }
    }
}

impl Painter for SoftwareDevice {
    fn push_transform(&mut self, affine: Affine) {
        self.stack.push(self.transform);
        self.transform *= affine;
        if !self.id_mode {
            self.ops.push(DrawOp::PushTransform {
                transform: self.transform,
            });
        }
    }

    fn pop_transform(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.transform = prev;
        } else {
            log::warn!("pop_transform without a matching push");
        }
        if !self.id_mode {
            self.ops.push(DrawOp::PopTransform);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if self.id_mode {
            let rect = rect.abs();
            self.raster(rect, |p| rect.contains(p));
        } else {
            self.ops.push(DrawOp::FillRect {
                rect,
                color,
                transform: self.transform,
            });
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        if self.id_mode {
            self.raster(path.bounding_box(), |p| path.contains(p));
        } else {
            self.ops.push(DrawOp::FillPath {
                path: path.clone(),
                color,
                transform: self.transform,
            });
        }
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        if self.id_mode {
            let half = width * 0.5;
            let reach = half * half;
            self.raster(path.bounding_box().inflate(half, half), |p| {
                path.segments()
                    .any(|seg| seg.nearest(p, 1e-6).distance_sq <= reach)
            });
        } else {
            self.ops.push(DrawOp::StrokePath {
                path: path.clone(),
                width,
                color,
                transform: self.transform,
            });
        }
    }

    fn supports_buffer_id(&self) -> bool {
        self.buffer_id
    }

    fn begin_buffer_id_mode(&mut self, width: u32, height: u32) {
        if !self.buffer_id {
            return;
        }
        self.id_mode = true;
        self.id_color = encode_id(NO_ITEM);
        self.ids = IdTarget {
            width,
            height,
            pixels: vec![encode_id(NO_ITEM); width as usize * height as usize],
        };
    }

    fn set_buffer_id(&mut self, id: u32) {
        self.id_color = encode_id(id);
    }

    fn end_buffer_id_mode(&mut self) {
        self.id_mode = false;
    }

    fn read_buffer_ids(&mut self, out: &mut Vec<u32>) -> bool {
        if !self.buffer_id || self.ids.pixels.is_empty() {
            return false;
        }
        out.clear();
        out.extend(self.ids.pixels.iter().map(|&rgb| decode_id(rgb)));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    const RED: Color = Color::from_rgb8(255, 0, 0);

    #[test]
    fn records_ops_with_transform() {
        let mut dev = SoftwareDevice::new();
        dev.push_transform(Affine::translate(Vec2::new(5.0, 0.0)));
        dev.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED);
        dev.pop_transform();
        assert_eq!(dev.ops().len(), 3);
        match &dev.ops()[1] {
            DrawOp::FillRect { transform, .. } => {
                assert_eq!(*transform, Affine::translate(Vec2::new(5.0, 0.0)));
            }
            other => panic!("unexpected op {other:?}"),
        }
        assert_eq!(dev.transform(), Affine::IDENTITY);
        assert_eq!(dev.stack_depth(), 0);
    }

    #[test]
    fn id_pass_rasterizes_pixel_centres() {
        let mut dev = SoftwareDevice::new();
        dev.begin_buffer_id_mode(8, 8);
        dev.set_buffer_id(3);
        dev.push_transform(Affine::translate(Vec2::new(2.0, 2.0)));
        dev.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), RED);
        dev.pop_transform();
        dev.end_buffer_id_mode();
        assert!(dev.ops().is_empty(), "id pass is not recorded");

        assert_eq!(dev.id_at(2, 2), 3);
        assert_eq!(dev.id_at(3, 3), 3);
        assert_eq!(dev.id_at(4, 4), NO_ITEM);
        assert_eq!(dev.id_at(1, 2), NO_ITEM);

        let mut ids = Vec::new();
        assert!(dev.read_buffer_ids(&mut ids));
        assert_eq!(ids.len(), 64);
        assert_eq!(ids[2 * 8 + 3], 3);
    }

    #[test]
    fn id_pass_paths_and_strokes() {
        let mut dev = SoftwareDevice::new();
        dev.begin_buffer_id_mode(10, 10);
        let mut tri = BezPath::new();
        tri.move_to((0.0, 0.0));
        tri.line_to((10.0, 0.0));
        tri.line_to((0.0, 10.0));
        tri.close_path();
        dev.set_buffer_id(1);
        dev.fill_path(&tri, RED);

        let mut line = BezPath::new();
        line.move_to((0.0, 8.5));
        line.line_to((10.0, 8.5));
        dev.set_buffer_id(2);
        dev.stroke_path(&line, 1.0, RED);
        dev.end_buffer_id_mode();

        assert_eq!(dev.id_at(1, 1), 1);
        assert_eq!(dev.id_at(8, 6), NO_ITEM, "outside the triangle");
        assert_eq!(dev.id_at(5, 8), 2);
        assert_eq!(dev.id_at(5, 9), NO_ITEM);
    }

    #[test]
    fn device_without_buffer_id_reads_nothing() {
        let mut dev = SoftwareDevice::without_buffer_id();
        assert!(!dev.supports_buffer_id());
        dev.begin_buffer_id_mode(4, 4);
        dev.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), RED);
        dev.end_buffer_id_mode();
        let mut ids = Vec::new();
        assert!(!dev.read_buffer_ids(&mut ids));
        assert_eq!(dev.ops().len(), 1, "draws stay in normal mode");
    }
}
