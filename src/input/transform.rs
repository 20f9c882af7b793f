//! Canvas transformations - wheel zoom, pan and zoom helpers.

use crate::constants::MIN_WHEEL_FACTOR_DELTA;
use crate::editor::Editor;
use crate::perf::measure;
use crate::types::Point;
use tracing::trace;

impl Editor {
    /// Zoom around the cursor. `delta_y` is the wheel delta in pixels
    /// (positive scrolls down and zooms out). Returns whether the zoom changed;
    /// at a zoom limit the camera is left untouched.
    pub fn handle_wheel(&mut self, position: Point, delta_y: f32) -> bool {
        let (changed, elapsed_ms) = measure(|| {
            let factor = 1.0 - delta_y * self.settings.wheel_zoom_speed;
            if (factor - 1.0).abs() < MIN_WHEEL_FACTOR_DELTA {
                return false;
            }
            self.canvas.camera.zoom_around(factor, position)
        });
        self.perf.record("wheel", elapsed_ms);
        if changed {
            trace!(zoom = self.canvas.camera.zoom(), "Wheel zoom");
            self.sync();
        }
        changed
    }

    /// Multiply the zoom by `factor`, keeping the world point under
    /// `screen_pos` fixed (toolbar zoom buttons).
    pub fn zoom_around(&mut self, factor: f32, screen_pos: Point) -> bool {
        let changed = self.canvas.camera.zoom_around(factor, screen_pos);
        if changed {
            self.sync();
        }
        changed
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.canvas.camera.pan_by(delta);
        self.sync();
    }
}
