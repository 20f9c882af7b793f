//! Input state machine - one explicit state per interaction mode.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging           (mouse press on a node, or a touch press promoted
//!                             by movement or hold time)
//! Idle -> PanningCamera      (press on empty canvas)
//! Idle/PanningCamera/Dragging -> PinchZooming   (second touch point)
//! PinchZooming -> PanningCamera                 (one of two fingers lifted)
//! Idle -> Linking            (start-linking command)
//! Idle -> EditingText        (double activation on a text node, or F2)
//!
//! Dragging/PanningCamera/PinchZooming -> Idle   (release or cancel)
//! Linking -> Idle            (next activation, or Escape)
//! EditingText -> Idle        (commit or cancel)
//! ```

use crate::input::pointer::PointerId;
use crate::types::{NodeId, Point, Size};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No active interaction
    #[default]
    Idle,

    /// Moving a node with the pointer
    Dragging {
        node: NodeId,
        /// Pointer world position minus node center at grab time
        grab_offset: Point,
        /// Node center when the drag started
        origin: Point,
        pointer: PointerId,
    },

    /// Moving the camera with the pointer
    PanningCamera {
        /// Last pointer position (screen) for delta calculation
        last_pos: Point,
        pointer: PointerId,
    },

    /// Two-finger zoom
    PinchZooming {
        /// Screen distance between the touches when the pinch began
        initial_distance: f32,
        /// Screen midpoint when the pinch began
        initial_center: Point,
        initial_zoom: f32,
        /// World point under the initial midpoint; stays under the midpoint
        anchor_world: Point,
    },

    /// Waiting for the target of a new connector
    Linking { source: NodeId },

    /// Editing a text node's label in place
    EditingText {
        node: NodeId,
        draft: String,
        /// Restored on cancel
        original_label: String,
        original_size: Size,
    },
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InputState::Idle)
    }

    /// True while a pointer gesture owns the state (drag, pan or pinch)
    pub fn is_pointer_gesture(&self) -> bool {
        matches!(
            self,
            InputState::Dragging { .. }
                | InputState::PanningCamera { .. }
                | InputState::PinchZooming { .. }
        )
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InputState::Dragging { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, InputState::PanningCamera { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, InputState::PinchZooming { .. })
    }

    pub fn is_linking(&self) -> bool {
        matches!(self, InputState::Linking { .. })
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(self, InputState::EditingText { .. })
    }

    pub fn linking_source(&self) -> Option<&NodeId> {
        match self {
            InputState::Linking { source } => Some(source),
            _ => None,
        }
    }

    pub fn editing_node(&self) -> Option<&NodeId> {
        match self {
            InputState::EditingText { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Node controls stay hidden while the user is busy with a node
    pub fn hides_overlays(&self) -> bool {
        matches!(
            self,
            InputState::Dragging { .. } | InputState::Linking { .. } | InputState::EditingText { .. }
        )
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            InputState::Idle => "idle",
            InputState::Dragging { .. } => "dragging",
            InputState::PanningCamera { .. } => "panning",
            InputState::PinchZooming { .. } => "pinching",
            InputState::Linking { .. } => "linking",
            InputState::EditingText { .. } => "editing_text",
        }
    }

    pub fn reset(&mut self) {
        *self = InputState::Idle;
    }
}
