//! Drag-to-pan with a split between continuous and committed updates.
//!
//! While a single pointer drags the canvas, every motion sample moves only a
//! lightweight presentation offset that the background grid follows. The
//! camera itself is written once, on release, with exactly the last offset
//! that was shown.

#[cfg(test)]
#[path = "pan_test.rs"]
mod pan_test;

use crate::camera::{Camera, Point};
use crate::sync::{Action, commit_actions};

/// Anchor of an in-progress pointer drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Viewport-local pointer position when the drag started.
    pub start_pointer: Point,
    /// Camera translation when the drag started.
    pub start_translation: Point,
}

impl Drag {
    #[must_use]
    pub fn start(pointer: Point, translation: Point) -> Self {
        Self { start_pointer: pointer, start_translation: translation }
    }

    /// Offset the view should show with the pointer at `pointer`.
    #[must_use]
    pub fn offset_for(&self, pointer: Point) -> Point {
        self.start_translation + (pointer - self.start_pointer)
    }
}

/// Presentation offset shown while a drag is in progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanTracker {
    presentation: Option<Point>,
}

impl PanTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The offset currently shown optimistically, if a drag has moved.
    #[must_use]
    pub fn presentation(&self) -> Option<Point> {
        self.presentation
    }

    /// Continuous phase: show `offset` on the grid only.
    pub fn show(&mut self, offset: Point) -> Vec<Action> {
        self.presentation = Some(offset);
        vec![Action::SetPatternOffset(offset)]
    }

    /// Commit phase: write `offset` into the camera.
    pub fn commit(&mut self, camera: &mut Camera, offset: Point) -> Vec<Action> {
        self.presentation = None;
        let previous = *camera;
        camera.translation = offset;
        tracing::debug!(x = offset.x, y = offset.y, "pan committed");
        commit_actions(&previous, camera)
    }

    /// Commit whatever offset is currently shown. No-op if nothing moved.
    pub fn settle(&mut self, camera: &mut Camera) -> Vec<Action> {
        match self.presentation {
            Some(offset) => self.commit(camera, offset),
            None => Vec::new(),
        }
    }
}
