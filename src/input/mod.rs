//! Pointer, wheel and keyboard-driven input handling for the canvas.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InputState`) to track
//! the current interaction mode. Mouse and touch are both reduced to
//! [`PointerEvent`]s first, so each rule is written once.
//!
//! ## Modules
//!
//! - `state` - Input state machine enum and helper methods
//! - `pointer` - Logical pointer events
//! - `gesture` - Touch bookkeeping, tap and double-tap classification
//! - `pointer_down` - Press handling (drag/pan/pinch start, text commit)
//! - `drag` - Move handling (drag, pan, pinch, hover, drag promotion)
//! - `pointer_up` - Release and cancel handling, activation
//! - `transform` - Wheel zoom and camera helpers
//! - `text_edit` - In-place text editing

pub mod coords;
pub mod gesture;
pub mod pointer;
mod state;
mod pointer_down;
mod drag;
mod pointer_up;
mod transform;
mod text_edit;

pub use pointer::{MOUSE_POINTER_ID, PointerDevice, PointerEvent, PointerId, PointerPhase};
pub use state::InputState;

use crate::editor::Editor;
use crate::perf::measure;
use tracing::trace;

impl Editor {
    /// Feed one pointer event through the state machine. The scene and
    /// overlays are in sync with the board when this returns.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let before = self.canvas.input_state.name();
        let (name, elapsed_ms) = measure(|| match event.phase {
            PointerPhase::Down => {
                self.handle_pointer_down(event);
                "pointer_down"
            }
            PointerPhase::Move => {
                self.handle_pointer_move(event);
                "pointer_move"
            }
            PointerPhase::Up => {
                self.handle_pointer_up(event);
                "pointer_up"
            }
            PointerPhase::Cancel => {
                self.handle_pointer_cancel(event);
                "pointer_cancel"
            }
        });
        self.perf.record(name, elapsed_ms);

        let after = self.canvas.input_state.name();
        if before != after {
            trace!(from = before, to = after, "Input state changed");
        }
        self.sync();
    }

    /// Convenience for hosts that deliver a batch (e.g. one touch event with
    /// several changed touches).
    pub fn handle_pointers(&mut self, events: &[PointerEvent]) {
        for event in events {
            self.handle_pointer(event);
        }
    }
}
