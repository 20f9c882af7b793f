//! Gesture bookkeeping: active touches, the pending press, tap and
//! double-tap classification.
//!
//! The state machine decides *what* a gesture does; this module only answers
//! questions about the raw pointer history ("is this release a tap?", "has
//! this touch press turned into a drag?").

use crate::input::pointer::{PointerDevice, PointerEvent, PointerId};
use crate::settings::GestureSettings;
use crate::types::{NodeId, Point};
use indexmap::IndexMap;

/// A press that has not been released yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPress {
    pub pointer: PointerId,
    pub device: PointerDevice,
    pub start_pos: Point,
    pub start_time_ms: u64,
    pub last_pos: Point,
    /// Node under the pointer when pressed
    pub node: Option<NodeId>,
    /// Largest distance from `start_pos` seen so far (screen px)
    pub max_movement: f32,
    /// A second touch joined while this press was down
    pub multi_touch: bool,
}

impl PendingPress {
    pub fn duration_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_time_ms)
    }

    /// Whether releasing at `now_ms` counts as a tap (touch) or click (mouse).
    /// Clicks have no duration limit.
    pub fn is_tap(&self, now_ms: u64, settings: &GestureSettings) -> bool {
        if self.multi_touch || self.max_movement >= settings.tap_max_movement {
            return false;
        }
        match self.device {
            PointerDevice::Mouse => true,
            PointerDevice::Touch => self.duration_ms(now_ms) < settings.tap_max_duration_ms,
        }
    }

    /// Whether a provisional touch press on a node should become a drag.
    pub fn drag_threshold_reached(&self, now_ms: u64, settings: &GestureSettings) -> bool {
        self.max_movement > settings.drag_start_distance
            || self.duration_ms(now_ms) >= settings.drag_start_delay_ms
    }

    fn matches(&self, event: &PointerEvent) -> bool {
        self.pointer == event.id && self.device == event.device
    }
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    /// Active touch points in the order they went down
    touches: IndexMap<PointerId, Point>,
    mouse_pressed: bool,
    press: Option<PendingPress>,
    /// Last single activation, for double-tap detection
    last_activation: Option<(NodeId, u64)>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer going down. Returns the number of active touches.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> usize {
        match event.device {
            PointerDevice::Touch => {
                self.touches.insert(event.id, event.position);
            }
            PointerDevice::Mouse => self.mouse_pressed = true,
        }
        self.touches.len()
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if event.is_touch() {
            if let Some(pos) = self.touches.get_mut(&event.id) {
                *pos = event.position;
            }
        }
        if let Some(press) = self.press.as_mut().filter(|p| p.matches(event)) {
            press.last_pos = event.position;
            press.max_movement = press.max_movement.max(press.start_pos.distance(event.position));
        }
    }

    /// Record a pointer going up; returns the press it ends, if any.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<PendingPress> {
        match event.device {
            PointerDevice::Touch => {
                self.touches.shift_remove(&event.id);
            }
            PointerDevice::Mouse => self.mouse_pressed = false,
        }
        if self.press.as_ref().is_some_and(|p| p.matches(event)) {
            self.pointer_move(event);
            return self.press.take();
        }
        None
    }

    /// Forget every pointer; nothing in flight may classify as a tap.
    pub fn cancel_all(&mut self) {
        self.touches.clear();
        self.mouse_pressed = false;
        self.press = None;
    }

    pub fn begin_press(&mut self, event: &PointerEvent, node: Option<NodeId>) {
        self.press = Some(PendingPress {
            pointer: event.id,
            device: event.device,
            start_pos: event.position,
            start_time_ms: event.time_ms,
            last_pos: event.position,
            node,
            max_movement: 0.0,
            multi_touch: false,
        });
    }

    pub fn press(&self) -> Option<&PendingPress> {
        self.press.as_ref()
    }

    /// A second finger joined: whatever is pressed can no longer be a tap.
    pub fn mark_multi_touch(&mut self) {
        if let Some(press) = self.press.as_mut() {
            press.multi_touch = true;
        }
    }

    /// Positions of the two oldest active touches.
    pub fn two_touches(&self) -> Option<(Point, Point)> {
        let mut iter = self.touches.values();
        Some((*iter.next()?, *iter.next()?))
    }

    /// The only remaining touch, if exactly one is down.
    pub fn single_touch(&self) -> Option<(PointerId, Point)> {
        if self.touches.len() != 1 {
            return None;
        }
        self.touches.first().map(|(&id, &pos)| (id, pos))
    }

    pub fn is_mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Register an activation on `node`. Returns true if it completes a
    /// double activation; the pair is consumed so a third tap starts over.
    pub fn register_activation(&mut self, node: &NodeId, now_ms: u64, window_ms: u64) -> bool {
        let is_double = self
            .last_activation
            .as_ref()
            .is_some_and(|(last, at)| last == node && now_ms.saturating_sub(*at) <= window_ms);
        self.last_activation = if is_double {
            None
        } else {
            Some((node.clone(), now_ms))
        };
        is_double
    }

    pub fn clear_activation(&mut self) {
        self.last_activation = None;
    }
}
