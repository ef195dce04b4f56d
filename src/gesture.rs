//! Gesture state machine coupling single-pointer drag and two-pointer pinch.
//!
//! The machine only sees pointer-count changes. It answers with
//! [`GestureCommand`]s that the engine carries out against the camera, the
//! pan tracker and the pinch history. Motion samples do not change the phase;
//! the engine routes them by [`GestureMachine::phase`].
//!
//! | From | Event | To | Commands |
//! |------|-------|----|----------|
//! | `Idle` | 1 pointer down | `TrackingSingle` | `BeginDrag` |
//! | `TrackingSingle` | 2nd pointer down | `TrackingPinch` (suspended) | `CancelDrag`, `ResetPinch` |
//! | `Idle` / `Parked` | 2nd pointer down | `TrackingPinch` | `ResetPinch` |
//! | `TrackingPinch` | lift to 1, suspended | `TrackingSingle` | `ResetPinch`, `ResumeDrag` |
//! | `TrackingPinch` | lift to 1, not suspended | `Parked` | `ResetPinch` |
//! | any | lift to 0 | `Idle` | `EndDrag` (from `TrackingSingle`), `ResetPinch` |

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::camera::Point;

/// Which interaction, if any, the active pointers are driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No pointers down.
    #[default]
    Idle,
    /// One pointer is panning the canvas.
    TrackingSingle,
    /// Two pointers are pinching.
    TrackingPinch,
    /// One pointer is down but drives nothing; it is the survivor of a pinch
    /// that did not interrupt a drag.
    Parked,
}

/// Pointer-count change fed to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A pointer went down; `active` counts tracked pointers afterwards.
    Down { active: usize, at: Point },
    /// A pointer lifted; `remaining` is the position of the pointer still
    /// down, if any.
    Up { active: usize, remaining: Option<Point> },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommand {
    /// Start a drag anchored at this pointer position.
    BeginDrag(Point),
    /// Stop the drag; its continuous updates end here.
    CancelDrag,
    /// Restart dragging from this pointer position.
    ResumeDrag(Point),
    /// The drag ended normally; commit it.
    EndDrag,
    /// Clear pinch history.
    ResetPinch,
}

/// The gesture state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureMachine {
    phase: GesturePhase,
    drag_suspended: bool,
}

impl GestureMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// True while a pinch interrupted a drag that should resume afterwards.
    #[must_use]
    pub fn drag_suspended(&self) -> bool {
        self.drag_suspended
    }

    /// Apply one event and return the commands it implies, in order.
    pub fn transition(&mut self, event: GestureEvent) -> Vec<GestureCommand> {
        let from = self.phase;
        let commands = match event {
            GestureEvent::Down { active, at } => self.on_down(active, at),
            GestureEvent::Up { active, remaining } => self.on_up(active, remaining),
        };
        if from != self.phase {
            tracing::debug!(?from, to = ?self.phase, suspended = self.drag_suspended, "gesture transition");
        }
        commands
    }

    fn on_down(&mut self, active: usize, at: Point) -> Vec<GestureCommand> {
        match (self.phase, active) {
            (GesturePhase::Idle, 1) => {
                self.phase = GesturePhase::TrackingSingle;
                vec![GestureCommand::BeginDrag(at)]
            }
            (GesturePhase::TrackingSingle, 2) => {
                self.phase = GesturePhase::TrackingPinch;
                self.drag_suspended = true;
                vec![GestureCommand::CancelDrag, GestureCommand::ResetPinch]
            }
            (GesturePhase::Idle | GesturePhase::Parked, 2) => {
                self.phase = GesturePhase::TrackingPinch;
                vec![GestureCommand::ResetPinch]
            }
            _ => Vec::new(),
        }
    }

    fn on_up(&mut self, active: usize, remaining: Option<Point>) -> Vec<GestureCommand> {
        if active == 0 {
            return self.all_lifted();
        }
        match (self.phase, active, remaining) {
            (GesturePhase::TrackingPinch, 1, Some(at)) if self.drag_suspended => {
                self.phase = GesturePhase::TrackingSingle;
                self.drag_suspended = false;
                vec![GestureCommand::ResetPinch, GestureCommand::ResumeDrag(at)]
            }
            (GesturePhase::TrackingPinch, 1, _) => {
                self.phase = GesturePhase::Parked;
                vec![GestureCommand::ResetPinch]
            }
            _ => Vec::new(),
        }
    }

    /// Every pointer lifted: back to `Idle` from any phase, with all
    /// gesture state cleared.
    fn all_lifted(&mut self) -> Vec<GestureCommand> {
        let was_dragging = self.phase == GesturePhase::TrackingSingle;
        self.phase = GesturePhase::Idle;
        self.drag_suspended = false;
        if was_dragging {
            vec![GestureCommand::EndDrag, GestureCommand::ResetPinch]
        } else {
            vec![GestureCommand::ResetPinch]
        }
    }
}
