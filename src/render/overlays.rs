//! Node controls overlay - the four "add child" buttons and the context menu.
//!
//! Overlays live in screen space. Their positions are derived from the target
//! node's world box projected through the camera, so they must be recomputed
//! after every camera change and every geometry change of the target.

use crate::camera::Camera;
use crate::constants::{ADD_BUTTON_OFFSET, CONTEXT_MENU_OFFSET_X, CONTEXT_MENU_OFFSET_Y};
use crate::types::{AnchorSide, Bounds, Node, NodeId, Point, point};
use serde::{Deserialize, Serialize};

/// Screen-pixel offsets of the controls from the node's screen box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOffsets {
    pub add_button: f32,
    pub menu_x: f32,
    pub menu_y: f32,
}

impl Default for OverlayOffsets {
    fn default() -> Self {
        Self {
            add_button: ADD_BUTTON_OFFSET,
            menu_x: CONTEXT_MENU_OFFSET_X,
            menu_y: CONTEXT_MENU_OFFSET_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddButtons {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

impl AddButtons {
    pub fn get(&self, side: AnchorSide) -> Point {
        match side {
            AnchorSide::Top => self.top,
            AnchorSide::Bottom => self.bottom,
            AnchorSide::Left => self.left,
            AnchorSide::Right => self.right,
        }
    }
}

/// Screen positions of every control for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayout {
    pub target: NodeId,
    /// The node's box in screen space
    pub screen_bounds: Bounds,
    pub add_buttons: AddButtons,
    /// Anchor of the context menu, above the top-right corner
    pub context_menu: Point,
}

impl OverlayLayout {
    pub fn compute(node: &Node, camera: &Camera, offsets: &OverlayOffsets) -> Self {
        let world = node.bounds();
        let screen = Bounds {
            min: camera.world_to_screen(world.min),
            max: camera.world_to_screen(world.max),
        };
        let center = screen.center();
        let gap = offsets.add_button;

        Self {
            target: node.id.clone(),
            screen_bounds: screen,
            add_buttons: AddButtons {
                top: point(center.x, screen.min.y - gap),
                bottom: point(center.x, screen.max.y + gap),
                left: point(screen.min.x - gap, center.y),
                right: point(screen.max.x + gap, center.y),
            },
            context_menu: point(screen.max.x + offsets.menu_x, screen.min.y - offsets.menu_y),
        }
    }
}

/// Current overlay layout plus whether an interaction is hiding it.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    layout: Option<OverlayLayout>,
    suppressed: bool,
}

impl OverlayState {
    /// Recompute for `target`, or clear when there is none.
    pub fn refresh(&mut self, target: Option<&Node>, camera: &Camera, offsets: &OverlayOffsets) {
        self.layout = target.map(|node| OverlayLayout::compute(node, camera, offsets));
    }

    /// Hide the controls for the duration of a drag, edit or link.
    pub fn suppress(&mut self) {
        self.suppressed = true;
    }

    pub fn restore(&mut self) {
        self.suppressed = false;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_visible(&self) -> bool {
        self.layout.is_some() && !self.suppressed
    }

    /// The layout to draw, if the controls are visible.
    pub fn visible_layout(&self) -> Option<&OverlayLayout> {
        self.layout.as_ref().filter(|_| !self.suppressed)
    }

    /// The last computed layout, even while hidden.
    pub fn layout(&self) -> Option<&OverlayLayout> {
        self.layout.as_ref()
    }
}
