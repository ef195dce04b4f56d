//! Output side of the controller: actions, sink traits and grid styling.
//!
//! Handlers in [`crate::engine`] never call sinks directly. They return a list
//! of [`Action`]s; [`dispatch`] routes each one to the [`RenderSurface`]
//! (authoritative camera) or the [`BackgroundSync`] sink (cheap visual grid).
//! Continuous pan samples only ever produce grid actions, so the render
//! surface is not repainted at input-sampling frequency.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::consts::{GRID_BACKGROUND_COLOR, GRID_BASE_GAP_PX, GRID_DOT_COLOR, GRID_DOT_RADIUS_PX};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// The camera was committed; repaint scene content.
    SetCamera(Camera),
    /// Move the background pattern to this screen-space offset.
    SetPatternOffset(Point),
    /// Rescale the background pattern for this camera scale.
    SetPatternDensity(f64),
    /// The input event is fully consumed; suppress native scrolling.
    PreventDefault,
}

/// The drawing surface holding scene content.
pub trait RenderSurface {
    /// Repaint content under `camera`.
    fn set_camera(&mut self, camera: Camera);
}

/// The visual reference grid behind the scene.
pub trait BackgroundSync {
    /// Tile the pattern from this screen-space offset.
    fn set_pattern_offset(&mut self, offset: Point);
    /// Space the pattern for this camera scale.
    fn set_pattern_density(&mut self, scale: f64);
}

/// Route `actions` to the sinks. [`Action::PreventDefault`] is left to the
/// caller, which owns the native event.
pub fn dispatch<R, B>(actions: &[Action], render: &mut R, background: &mut B)
where
    R: RenderSurface + ?Sized,
    B: BackgroundSync + ?Sized,
{
    for action in actions {
        match *action {
            Action::SetCamera(camera) => render.set_camera(camera),
            Action::SetPatternOffset(offset) => background.set_pattern_offset(offset),
            Action::SetPatternDensity(scale) => background.set_pattern_density(scale),
            Action::PreventDefault => {}
        }
    }
}

/// Actions announcing a committed camera.
///
/// Density is only included when the scale actually changed.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn commit_actions(previous: &Camera, next: &Camera) -> Vec<Action> {
    let mut actions = Vec::with_capacity(3);
    actions.push(Action::SetCamera(*next));
    actions.push(Action::SetPatternOffset(next.translation));
    if previous.scale != next.scale {
        actions.push(Action::SetPatternDensity(next.scale));
    }
    actions
}

/// Dot-grid appearance, expressed as CSS background values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    /// Dot spacing at scale 1, in CSS pixels.
    pub base_gap: f64,
    pub dot_radius: f64,
    pub dot_color: String,
    pub background_color: String,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            base_gap: GRID_BASE_GAP_PX,
            dot_radius: GRID_DOT_RADIUS_PX,
            dot_color: GRID_DOT_COLOR.to_string(),
            background_color: GRID_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl GridStyle {
    /// Screen-space dot spacing at `scale`. Linear in scale so the grid stays
    /// fixed in world units.
    #[must_use]
    pub fn spacing(&self, scale: f64) -> f64 {
        self.base_gap * scale
    }

    /// `background-size` value for `scale`.
    #[must_use]
    pub fn background_size_css(&self, scale: f64) -> String {
        let gap = self.spacing(scale);
        format!("{gap}px {gap}px")
    }

    /// `background-position` value for a screen-space offset.
    #[must_use]
    pub fn background_position_css(offset: Point) -> String {
        format!("{}px {}px", offset.x, offset.y)
    }

    /// `background-image` value drawing one dot per tile.
    #[must_use]
    pub fn background_image_css(&self) -> String {
        format!("radial-gradient({} {r}px, transparent {r}px)", self.dot_color, r = self.dot_radius)
    }
}
