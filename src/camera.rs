//! Camera state and the screen/world coordinate mapping.
//!
//! The camera maps world space onto screen space as
//! `screen = world * scale + translation`. Every zoom gesture keeps one
//! screen-space anchor fixed while the scale changes; the translation that
//! achieves this is computed by [`anchored_translation`], which both wheel and
//! pinch zoom share.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self { x: (self.x + other.x) / 2.0, y: (self.y + other.y) / 2.0 }
    }

    /// Euclidean distance between `self` and `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Inclusive bounds on the camera scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: MIN_SCALE, max: MAX_SCALE }
    }
}

impl ScaleLimits {
    /// Limits spanning `a` and `b`, whichever order they come in.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Clamp a requested scale into `[min, max]`. Never rejects and never
    /// panics, even on inverted limits (the result is then `max`).
    ///
    /// A NaN request resolves to `min`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.max(self.min).min(self.max)
    }

    /// Whether `scale` lies inside the limits.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `translation` is the screen-space position (CSS pixels) of the world
/// origin. `scale` is the zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scale: f64,
    pub translation: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, translation: Point::new(0.0, 0.0) }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translation.x) / self.scale,
            y: (screen.y - self.translation.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.translation.x,
            y: world.y * self.scale + self.translation.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Convert a world-space distance to screen pixels.
    #[must_use]
    pub fn world_dist_to_screen(&self, world_dist: f64) -> f64 {
        world_dist * self.scale
    }

    /// Camera zoomed to `requested_scale` (clamped) with `anchor_screen` held
    /// fixed on screen.
    #[must_use]
    pub fn zoomed_about(&self, anchor_screen: Point, requested_scale: f64, limits: ScaleLimits) -> Self {
        let anchor_world = self.screen_to_world(anchor_screen);
        let scale = limits.clamp(requested_scale);
        Self { scale, translation: anchored_translation(anchor_world, anchor_screen, scale) }
    }
}

/// Translation that maps `anchor_world` onto `anchor_screen` at `scale`.
///
/// `translation' = anchor_screen - anchor_world * scale`
#[must_use]
pub fn anchored_translation(anchor_world: Point, anchor_screen: Point, scale: f64) -> Point {
    Point {
        x: anchor_screen.x - anchor_world.x * scale,
        y: anchor_screen.y - anchor_world.y * scale,
    }
}
