//! Camera state: pan offset in screen pixels plus a uniform zoom.
//!
//! All screen/world conversions go through [`CoordinateConverter`], which
//! derives the matrix from the current pan/zoom on every call.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::input::coords::{AffineTransform, CoordinateContext, CoordinateConverter};
use crate::types::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "CameraRecord")]
pub struct Camera {
    /// Screen-space translation
    pub pan: Point,
    /// Uniform scale, always within [MIN_ZOOM, MAX_ZOOM]
    zoom: f32,
}

/// Wire shape of a camera; zoom is clamped on the way in.
#[derive(Deserialize)]
struct CameraRecord {
    pan: Point,
    zoom: f32,
}

impl From<CameraRecord> for Camera {
    fn from(record: CameraRecord) -> Self {
        Camera::new(record.pan, record.zoom)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Point::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    pub fn new(pan: Point, zoom: f32) -> Self {
        Self {
            pan,
            zoom: clamp_zoom(zoom),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// World-to-screen matrix
    pub fn matrix(&self) -> AffineTransform {
        CoordinateContext::new(&self.pan, self.zoom).matrix()
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        CoordinateConverter::screen_to_world(screen, &CoordinateContext::new(&self.pan, self.zoom))
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        CoordinateConverter::world_to_screen(world, &CoordinateContext::new(&self.pan, self.zoom))
    }

    /// Pan is a screen-space operation: the delta is applied as-is.
    pub fn pan_by(&mut self, screen_delta: Point) {
        self.pan += screen_delta;
    }

    /// Multiply the zoom by `factor`, keeping the world point under
    /// `screen_pos` fixed. Returns false when clamping left the zoom unchanged.
    pub fn zoom_around(&mut self, factor: f32, screen_pos: Point) -> bool {
        self.set_zoom_around(self.zoom * factor, screen_pos)
    }

    /// Set the zoom (clamped), keeping the world point under `screen_pos` fixed.
    pub fn set_zoom_around(&mut self, zoom: f32, screen_pos: Point) -> bool {
        let clamped = clamp_zoom(zoom);
        if clamped == self.zoom {
            return false;
        }
        let anchor = self.screen_to_world(screen_pos);
        self.zoom = clamped;
        self.pin(anchor, screen_pos);
        true
    }

    /// Set the zoom (clamped) and move the pan so `world` lands on `screen`.
    pub fn set_zoom_pinned(&mut self, zoom: f32, world: Point, screen: Point) {
        self.zoom = clamp_zoom(zoom);
        self.pin(world, screen);
    }

    fn pin(&mut self, world: Point, screen: Point) {
        self.pan = screen - world * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Clamp a zoom level to [MIN_ZOOM, MAX_ZOOM]; non-finite values reset to default.
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}
