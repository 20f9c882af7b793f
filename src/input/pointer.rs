//! Logical pointer events.
//!
//! Mouse and touch input are both reduced to [`PointerEvent`]s before they
//! reach the state machine, so every gesture rule is written once.

use crate::types::Point;

pub type PointerId = u64;

/// Id used for the (single) mouse pointer.
pub const MOUSE_POINTER_ID: PointerId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDevice {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (touchcancel, lost capture)
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub device: PointerDevice,
    pub phase: PointerPhase,
    /// Screen position in viewport pixels
    pub position: Point,
    /// Host timestamp in milliseconds
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, position: Point, time_ms: u64) -> Self {
        Self {
            id: MOUSE_POINTER_ID,
            device: PointerDevice::Mouse,
            phase,
            position,
            time_ms,
        }
    }

    pub fn touch(id: PointerId, phase: PointerPhase, position: Point, time_ms: u64) -> Self {
        Self {
            id,
            device: PointerDevice::Touch,
            phase,
            position,
            time_ms,
        }
    }

    pub fn mouse_down(position: Point, time_ms: u64) -> Self {
        Self::mouse(PointerPhase::Down, position, time_ms)
    }

    pub fn mouse_move(position: Point, time_ms: u64) -> Self {
        Self::mouse(PointerPhase::Move, position, time_ms)
    }

    pub fn mouse_up(position: Point, time_ms: u64) -> Self {
        Self::mouse(PointerPhase::Up, position, time_ms)
    }

    pub fn touch_start(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::touch(id, PointerPhase::Down, position, time_ms)
    }

    pub fn touch_move(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::touch(id, PointerPhase::Move, position, time_ms)
    }

    pub fn touch_end(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::touch(id, PointerPhase::Up, position, time_ms)
    }

    pub fn touch_cancel(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::touch(id, PointerPhase::Cancel, position, time_ms)
    }

    /// One event per changed touch, the shape touch APIs report them in.
    pub fn from_touches(
        phase: PointerPhase,
        changed: &[(PointerId, Point)],
        time_ms: u64,
    ) -> Vec<PointerEvent> {
        changed
            .iter()
            .map(|&(id, position)| Self::touch(id, phase, position, time_ms))
            .collect()
    }

    pub fn is_touch(&self) -> bool {
        self.device == PointerDevice::Touch
    }
}
