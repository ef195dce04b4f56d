//! Input model: wheel events, pointer identities and the active-pointer set.
//!
//! Pointer positions are stored in viewport-local coordinates (client
//! coordinates minus the viewport's top-left corner). Only the first two
//! pointers to go down are tracked; further contacts are ignored until one of
//! the tracked pointers lifts.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Maximum number of simultaneously tracked pointers.
pub const MAX_TRACKED_POINTERS: usize = 2;

/// Browser-assigned pointer identifier (`PointerEvent.pointerId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub i32);

/// Wheel / trackpad scroll input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    /// Vertical scroll amount (positive = down, i.e. zoom out).
    pub delta_y: f64,
    /// Pointer position local to the viewport, if the pointer is over it.
    pub pointer: Option<Point>,
}

/// The pointers currently pressed on the viewport, in press order.
#[derive(Debug, Clone, Default)]
pub struct PointerSet {
    active: Vec<(PointerId, Point)>,
}

impl PointerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id` at `at`. Returns `false` if the pointer is already
    /// tracked or the set is full.
    pub fn press(&mut self, id: PointerId, at: Point) -> bool {
        if self.active.len() >= MAX_TRACKED_POINTERS || self.position(id).is_some() {
            return false;
        }
        self.active.push((id, at));
        true
    }

    /// Update the position of a tracked pointer. Returns `false` for unknown ids.
    pub fn update(&mut self, id: PointerId, at: Point) -> bool {
        match self.active.iter_mut().find(|(pid, _)| *pid == id) {
            Some(entry) => {
                entry.1 = at;
                true
            }
            None => false,
        }
    }

    /// Stop tracking `id`. Returns `false` for unknown ids.
    pub fn release(&mut self, id: PointerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(pid, _)| *pid != id);
        self.active.len() != before
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Last known position of `id`.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.active.iter().find(|(pid, _)| *pid == id).map(|(_, p)| *p)
    }

    /// Position of the earliest-pressed pointer still down.
    #[must_use]
    pub fn first(&self) -> Option<Point> {
        self.active.first().map(|(_, p)| *p)
    }

    /// Both positions when exactly two pointers are down.
    #[must_use]
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.active.as_slice() {
            [(_, a), (_, b)] => Some((*a, *b)),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
