// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D affine transform used to map between item-local and parent spaces.

use core::ops::Mul;

use kurbo::{Affine, Point, Vec2};

/// A 3×3 affine matrix whose last row is implicitly `0 0 1`.
///
/// This is a thin wrapper around [`kurbo::Affine`] that adds the inverse
/// mapping helpers the scene needs and never panics on a degenerate matrix:
/// [`Transform2D::inverse_map_point`] returns `None` instead.
///
/// Composition follows matrix multiplication: `a * b` applies `b` first.
///
/// ```
/// use kurbo::Point;
/// use plotscene_tree::Transform2D;
///
/// let tf = Transform2D::translate(10.0, 10.0) * Transform2D::scale(2.0, 2.0);
/// assert_eq!(tf.map_point(Point::new(1.0, 1.0)), Point::new(12.0, 12.0));
/// assert_eq!(tf.inverse_map_point(Point::new(12.0, 12.0)), Some(Point::new(1.0, 1.0)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform2D(Affine);

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// A pure translation.
    pub fn translate(dx: f64, dy: f64) -> Self {
        Self(Affine::translate(Vec2::new(dx, dy)))
    }

    /// A (possibly non-uniform) scale about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self(Affine::scale_non_uniform(sx, sy))
    }

    /// Wrap an existing [`Affine`].
    pub const fn from_affine(affine: Affine) -> Self {
        Self(affine)
    }

    /// The underlying [`Affine`].
    pub const fn as_affine(self) -> Affine {
        self.0
    }

    /// Build from a row-major 3×3 matrix. The last row is ignored.
    pub fn from_matrix3(m: [[f64; 3]; 3]) -> Self {
        Self(Affine::new([
            m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2],
        ]))
    }

    /// Row-major 3×3 matrix form.
    pub fn to_matrix3(self) -> [[f64; 3]; 3] {
        let [a, b, c, d, e, f] = self.0.as_coeffs();
        [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]]
    }

    /// Apply `self` after `other`, i.e. `self * other`.
    #[must_use]
    pub fn then(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Concatenate a translation after this transform has been applied.
    #[must_use]
    pub fn then_translate(self, dx: f64, dy: f64) -> Self {
        Self(self.0.then_translate(Vec2::new(dx, dy)))
    }

    /// Determinant of the linear part.
    pub fn determinant(self) -> f64 {
        self.0.determinant()
    }

    /// Whether the matrix is finite and has a non-zero determinant.
    pub fn is_invertible(self) -> bool {
        let det = self.determinant();
        self.0.is_finite() && det.is_finite() && det != 0.0
    }

    /// The inverse transform, or `None` if the matrix is degenerate.
    pub fn try_inverse(self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        let inv = self.0.inverse();
        inv.is_finite().then_some(Self(inv))
    }

    /// Forward-map a point.
    pub fn map_point(self, p: Point) -> Point {
        self.0 * p
    }

    /// Inverse-map a point, or `None` if the matrix is degenerate.
    pub fn inverse_map_point(self, p: Point) -> Option<Point> {
        self.try_inverse().map(|inv| inv.0 * p)
    }
}

impl Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.then(rhs)
    }
}

impl Mul<Point> for Transform2D {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.map_point(rhs)
    }
}

impl From<Affine> for Transform2D {
    fn from(affine: Affine) -> Self {
        Self(affine)
    }
}

impl From<Transform2D> for Affine {
    fn from(tf: Transform2D) -> Self {
        tf.0
    }
}
