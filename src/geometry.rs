//! Anchor and connector curve geometry.
//!
//! Connectors leave and enter nodes perpendicular to the border: each control
//! point is its anchor pushed outward along that side's normal by
//! [`CURVE_FACTOR`]. The curve therefore depends only on the two anchors, so it
//! stays visually stable while either node is dragged.

use crate::constants::{ANCHOR_VERTICAL_THRESHOLD, CURVE_FACTOR};
use crate::types::{AnchorSide, Node, Point, point};
use serde::{Deserialize, Serialize};

/// Midpoint of the given side of the node's bounding box, in world space.
pub fn anchor_point(node: &Node, side: AnchorSide) -> Point {
    let half_w = node.width / 2.0;
    let half_h = node.height / 2.0;
    match side {
        AnchorSide::Top => point(node.x, node.y - half_h),
        AnchorSide::Bottom => point(node.x, node.y + half_h),
        AnchorSide::Left => point(node.x - half_w, node.y),
        AnchorSide::Right => point(node.x + half_w, node.y),
    }
}

/// Choose anchor sides for a connection from `source` to `target`.
///
/// Horizontal default first (`right -> left`, flipped when the target is to
/// the left), then the vertical checks, which override it whenever the target
/// is more than [`ANCHOR_VERTICAL_THRESHOLD`] above or below.
pub fn auto_anchors(source: &Node, target: &Node) -> (AnchorSide, AnchorSide) {
    let mut anchors = (AnchorSide::Right, AnchorSide::Left);
    if target.x < source.x {
        anchors = (AnchorSide::Left, AnchorSide::Right);
    }
    if target.y < source.y - ANCHOR_VERTICAL_THRESHOLD {
        anchors = (AnchorSide::Top, AnchorSide::Bottom);
    }
    if target.y > source.y + ANCHOR_VERTICAL_THRESHOLD {
        anchors = (AnchorSide::Bottom, AnchorSide::Top);
    }
    anchors
}

/// A cubic Bézier connector in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    pub start: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub end: Point,
}

impl CubicCurve {
    /// Curve between two anchors with perpendicular control points.
    pub fn between(start: Point, start_side: AnchorSide, end: Point, end_side: AnchorSide) -> Self {
        Self {
            start,
            ctrl1: start + start_side.normal() * CURVE_FACTOR,
            ctrl2: end + end_side.normal() * CURVE_FACTOR,
            end,
        }
    }

    /// Evaluate the curve at `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        point(
            a * self.start.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.end.x,
            a * self.start.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.end.y,
        )
    }

    /// SVG path data: `M sx sy C c1x c1y, c2x c2y, tx ty`
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.ctrl1.x,
            self.ctrl1.y,
            self.ctrl2.x,
            self.ctrl2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// The connector between two nodes for the given anchor sides.
pub fn curve_between(
    source: &Node,
    source_side: AnchorSide,
    target: &Node,
    target_side: AnchorSide,
) -> CubicCurve {
    CubicCurve::between(
        anchor_point(source, source_side),
        source_side,
        anchor_point(target, target_side),
        target_side,
    )
}
