//! Release handling - end gestures, classify taps, activate nodes.

use crate::editor::{Editor, EditorEvent};
use crate::input::InputState;
use crate::input::pointer::{PointerDevice, PointerEvent};
use crate::profile_scope;
use crate::types::{NodeContent, NodeId};
use tracing::{debug, warn};

impl Editor {
    pub(crate) fn handle_pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_up");

        let press = self.canvas.gestures.pointer_up(event);
        let tap = press
            .as_ref()
            .is_some_and(|p| p.is_tap(event.time_ms, &self.settings.gestures));

        match &self.canvas.input_state {
            InputState::PinchZooming { .. } => {
                // Lifting one finger resumes panning with the other
                self.canvas.input_state = match self.canvas.gestures.single_touch() {
                    Some((pointer, last_pos)) => InputState::PanningCamera { last_pos, pointer },
                    None => InputState::Idle,
                };
                debug!(state = self.canvas.input_state.name(), "Pinch ended");
                return;
            }
            InputState::Dragging {
                pointer,
                node,
                origin,
                ..
            } if *pointer == event.id => {
                let (node, origin) = (node.clone(), *origin);
                self.canvas.input_state.reset();
                // A promoted touch press that still classifies as a tap was
                // never a drag: the node goes back where it was.
                if tap && event.device == PointerDevice::Touch {
                    debug!(%node, "Touch drag released as tap");
                    if let Err(e) = self.canvas.board.move_node(&node, origin) {
                        warn!(error = %e, "Tapped node vanished");
                    }
                } else {
                    debug!(%node, "Drag ended");
                }
            }
            InputState::PanningCamera { pointer, .. } if *pointer == event.id => {
                self.canvas.input_state.reset();
            }
            _ => {}
        }

        if let Some(press) = press.filter(|_| tap) {
            self.activate(press.node, event.time_ms);
        }
    }

    /// The platform took the pointer away. Whatever gesture was running is
    /// abandoned and nothing counts as a tap.
    pub(crate) fn handle_pointer_cancel(&mut self, event: &PointerEvent) {
        debug!(pointer = event.id, state = self.canvas.input_state.name(), "Pointer cancelled");
        self.canvas.gestures.cancel_all();
        if self.canvas.input_state.is_pointer_gesture() {
            self.canvas.input_state.reset();
        }
    }

    /// A tap or click on `node` (`None` for empty canvas).
    fn activate(&mut self, node: Option<NodeId>, now_ms: u64) {
        let node = node.filter(|id| self.canvas.board.contains_node(id));

        if self.canvas.input_state.is_linking() {
            self.canvas.gestures.clear_activation();
            self.finish_linking(node.as_ref());
            return;
        }

        let Some(id) = node else {
            self.session.selected = None;
            self.canvas.gestures.clear_activation();
            return;
        };
        self.session.selected = Some(id.clone());
        let window = self.settings.gestures.double_tap_window_ms;
        if self.canvas.gestures.register_activation(&id, now_ms, window) {
            self.double_activate(&id);
        }
    }

    fn double_activate(&mut self, id: &NodeId) {
        let Some(node) = self.canvas.board.node(id) else {
            return;
        };
        match &node.content {
            NodeContent::Text { .. } => {
                if let Err(e) = self.begin_text_edit(id) {
                    warn!(error = %e, "Could not start text edit");
                }
            }
            NodeContent::Image { image_data, .. } => {
                let image_data = image_data.clone();
                self.events.push(EditorEvent::OpenImage {
                    node: id.clone(),
                    image_data,
                });
            }
            NodeContent::Entity(_) => {
                self.events.push(EditorEvent::EditEntity { node: id.clone() });
            }
        }
    }
}
