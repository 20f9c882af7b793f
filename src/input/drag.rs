//! Move handling - node drag, camera pan, pinch zoom, hover.
//!
//! ## Performance Notes
//!
//! Moves arrive at display rate during a drag. A drag move touches one node,
//! its incident curves and its R-tree entry; the scene is patched rather
//! than rebuilt.

use crate::camera::clamp_zoom;
use crate::editor::Editor;
use crate::input::InputState;
use crate::input::pointer::{PointerDevice, PointerEvent};
use crate::profile_scope;
use tracing::{trace, warn};

impl Editor {
    pub(crate) fn handle_pointer_move(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_move");

        self.canvas.gestures.pointer_move(event);

        match &self.canvas.input_state {
            InputState::PinchZooming { .. } => self.update_pinch(),
            InputState::Dragging {
                node,
                grab_offset,
                pointer,
                ..
            } if *pointer == event.id => {
                let node = node.clone();
                let center = self.screen_to_world(event.position) - *grab_offset;
                if let Err(e) = self.canvas.board.move_node(&node, center) {
                    warn!(error = %e, "Dragged node vanished");
                    self.canvas.input_state.reset();
                }
            }
            InputState::PanningCamera { last_pos, pointer } if *pointer == event.id => {
                let delta = event.position - *last_pos;
                self.canvas.camera.pan_by(delta);
                self.canvas.input_state = InputState::PanningCamera {
                    last_pos: event.position,
                    pointer: event.id,
                };
            }
            InputState::Idle => {
                if !self.promote_pending_press(event.time_ms) {
                    self.update_hover(event);
                }
            }
            InputState::Linking { .. } => self.update_hover(event),
            _ => {}
        }
    }

    /// Promote a provisional touch press on a node to a drag once it moved
    /// far enough or was held long enough. Called on moves and from
    /// [`Editor::tick`].
    fn promote_pending_press(&mut self, now_ms: u64) -> bool {
        if !self.canvas.input_state.is_idle() {
            return false;
        }
        let Some(press) = self.canvas.gestures.press() else {
            return false;
        };
        if press.device != PointerDevice::Touch || press.multi_touch {
            return false;
        }
        let Some(node) = press.node.clone() else {
            return false;
        };
        if !press.drag_threshold_reached(now_ms, &self.settings.gestures)
            || !self.canvas.board.contains_node(&node)
        {
            return false;
        }
        let (pointer, start, current) = (press.pointer, press.start_pos, press.last_pos);

        trace!(%node, "Touch press promoted to drag");
        self.start_drag(node.clone(), self.screen_to_world(start), pointer);
        if let InputState::Dragging { grab_offset, .. } = self.canvas.input_state {
            let center = self.screen_to_world(current) - grab_offset;
            if let Err(e) = self.canvas.board.move_node(&node, center) {
                warn!(error = %e, "Promoted drag lost its node");
            }
        }
        true
    }

    /// Advance timers: a touch held on a node becomes a drag after the
    /// drag-start delay even without movement.
    pub fn tick(&mut self, now_ms: u64) {
        if self.promote_pending_press(now_ms) {
            self.sync();
        }
    }

    fn update_pinch(&mut self) {
        let InputState::PinchZooming {
            initial_distance,
            initial_zoom,
            anchor_world,
            ..
        } = self.canvas.input_state
        else {
            return;
        };
        let Some((a, b)) = self.canvas.gestures.two_touches() else {
            return;
        };
        let zoom = clamp_zoom(initial_zoom * a.distance(b) / initial_distance);
        self.canvas
            .camera
            .set_zoom_pinned(zoom, anchor_world, a.midpoint(b));
    }

    /// Mouse hover with no button held.
    fn update_hover(&mut self, event: &PointerEvent) {
        if event.device != PointerDevice::Mouse || self.canvas.gestures.is_mouse_pressed() {
            return;
        }
        let world = self.screen_to_world(event.position);
        self.session.hovered = self.canvas.board.node_at(world).cloned();
    }
}
