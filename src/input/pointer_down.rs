//! Press handling - drag/pan start, pinch start, text commit on blur.
//!
//! ## Performance Notes
//!
//! Hit testing goes through the board's R-tree, so a press costs
//! O(log n) regardless of board size.

use crate::editor::Editor;
use crate::input::InputState;
use crate::input::pointer::{PointerDevice, PointerEvent, PointerId};
use crate::profile_scope;
use crate::types::{NodeId, Point};
use tracing::debug;

impl Editor {
    pub(crate) fn handle_pointer_down(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_down");

        let touches = self.canvas.gestures.pointer_down(event);
        if event.is_touch() && touches >= 2 {
            self.canvas.gestures.mark_multi_touch();
            let state = &self.canvas.input_state;
            if state.is_idle() || state.is_panning() || state.is_dragging() {
                self.begin_pinch();
            }
            return;
        }

        // Pressing the canvas blurs the text field
        if self.canvas.input_state.is_editing_text() {
            self.commit_text_edit();
        }

        let world = self.screen_to_world(event.position);
        let hit = self.canvas.board.node_at(world).cloned();
        self.canvas.gestures.begin_press(event, hit.clone());

        // Linking resolves on release; presses never drag or pan meanwhile
        if !self.canvas.input_state.is_idle() {
            return;
        }

        match (hit, event.device) {
            (Some(node), PointerDevice::Mouse) => self.start_drag(node, world, event.id),
            // Touch presses on a node stay provisional until moved or held
            (Some(_), PointerDevice::Touch) => {}
            (None, _) => {
                self.canvas.input_state = InputState::PanningCamera {
                    last_pos: event.position,
                    pointer: event.id,
                };
            }
        }
    }

    /// Enter `Dragging`, remembering where on the node it was grabbed.
    pub(crate) fn start_drag(&mut self, node: NodeId, grab_world: Point, pointer: PointerId) {
        let Some(center) = self.canvas.board.node(&node).map(|n| n.center()) else {
            return;
        };
        debug!(%node, "Drag started");
        self.canvas.input_state = InputState::Dragging {
            node,
            grab_offset: grab_world - center,
            origin: center,
            pointer,
        };
    }

    fn begin_pinch(&mut self) {
        let Some((a, b)) = self.canvas.gestures.two_touches() else {
            return;
        };
        let distance = a.distance(b);
        if distance <= f32::EPSILON {
            return;
        }
        let center = a.midpoint(b);
        debug!(distance, "Pinch started");
        self.canvas.input_state = InputState::PinchZooming {
            initial_distance: distance,
            initial_center: center,
            initial_zoom: self.canvas.camera.zoom(),
            anchor_world: self.canvas.camera.screen_to_world(center),
        };
    }
}
