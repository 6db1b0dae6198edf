// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect};

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in the target space.
///
/// ```
/// use kurbo::{Affine, Rect, Vec2};
/// use plotscene_tree::transform_rect_bbox;
///
/// let r = transform_rect_bbox(
///     Affine::translate(Vec2::new(10.0, 10.0)),
///     Rect::new(0.0, 0.0, 20.0, 20.0),
/// );
/// assert_eq!(r, Rect::new(10.0, 10.0, 30.0, 30.0));
/// ```
pub fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let min_x = (a * rect.x0).min(a * rect.x1) + (c * rect.y0).min(c * rect.y1);
    let max_x = (a * rect.x0).max(a * rect.x1) + (c * rect.y0).max(c * rect.y1);
    let min_y = (b * rect.x0).min(b * rect.x1) + (d * rect.y0).min(d * rect.y1);
    let max_y = (b * rect.x0).max(b * rect.x1) + (d * rect.y0).max(d * rect.y1);
    Rect::new(min_x + e, min_y + f, max_x + e, max_y + f)
}
