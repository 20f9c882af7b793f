//! Coordinate conversion utilities for canvas interactions.
//!
//! The camera is a single affine matrix: scale by `zoom` in world space, then
//! translate by `pan` in screen space. Screen-to-world conversion inverts that
//! matrix as a whole rather than undoing the two steps separately, which keeps
//! both directions exact inverses at any zoom.

use crate::types::{Point, point};

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub pan: &'a Point,
    pub zoom: f32,
}

impl<'a> CoordinateContext<'a> {
    #[inline]
    pub fn new(pan: &'a Point, zoom: f32) -> Self {
        Self { pan, zoom }
    }

    /// The world-to-screen matrix for this camera
    #[inline]
    pub fn matrix(&self) -> AffineTransform {
        AffineTransform::translate(self.pan.x, self.pan.y)
            .then_after(AffineTransform::scale(self.zoom))
    }
}

/// 2D affine transform in the `[a b c d e f]` layout used by SVG:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(s: f32) -> Self {
        Self {
            a: s,
            d: s,
            ..Self::IDENTITY
        }
    }

    /// `self * inner`: applies `inner` first, then `self`.
    #[must_use]
    pub fn then_after(self, inner: AffineTransform) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse matrix, or `None` when the transform is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        point(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert screen position to world position
    #[inline]
    pub fn screen_to_world(screen_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        // A camera with zoom clamped to [MIN_ZOOM, MAX_ZOOM] is never singular.
        ctx.matrix()
            .inverse()
            .map(|inv| inv.apply(screen_pos))
            .unwrap_or(screen_pos)
    }

    /// Convert world position to screen position
    #[inline]
    pub fn world_to_screen(world_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        ctx.matrix().apply(world_pos)
    }
}
