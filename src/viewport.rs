//! Viewport geometry supplied by the surrounding container.
//!
//! The controller never reads window globals; the host pushes a
//! [`ViewportSize`] on every resize and a [`ViewportBounds`] with every
//! multi-pointer event.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};

/// Viewport dimensions in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Screen-space bounding rectangle of the viewport element.
///
/// Pointer events arrive in client coordinates; subtracting the top-left
/// corner yields coordinates local to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportBounds {
    /// Bounds at the client origin with the given size.
    #[must_use]
    pub fn at_origin(size: ViewportSize) -> Self {
        Self { left: 0.0, top: 0.0, width: size.width, height: size.height }
    }

    /// Convert a client-space point into viewport-local coordinates.
    #[must_use]
    pub fn localize(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// An axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub min: Point,
    pub max: Point,
}

impl WorldRect {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether `p` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The part of world space currently visible through `size` under `camera`.
#[must_use]
pub fn visible_world_rect(camera: &Camera, size: ViewportSize) -> WorldRect {
    WorldRect {
        min: camera.screen_to_world(Point::new(0.0, 0.0)),
        max: camera.screen_to_world(Point::new(size.width, size.height)),
    }
}
