//! Two-pointer pinch tracking.
//!
//! A pinch needs two samples of history before it can move the camera: the
//! first sample records the centroid, the second the separation. From the
//! third sample on, the separation ratio zooms about the current centroid and
//! the centroid displacement pans.

#[cfg(test)]
#[path = "pinch_test.rs"]
mod pinch_test;

use crate::camera::{Camera, Point, ScaleLimits, anchored_translation};

/// Result of feeding one two-pointer sample to a [`PinchTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchStep {
    /// First sample of the sequence: centroid recorded, camera untouched.
    RecordedCenter,
    /// Second sample of the sequence: separation recorded, camera untouched.
    RecordedDistance,
    /// The camera the sample moves to.
    Moved(Camera),
}

/// Previous-sample history for the active pinch.
///
/// Empty whenever fewer than two pointers are down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchTracker {
    last_center: Option<Point>,
    last_distance: Option<f64>,
}

impl PinchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_center(&self) -> Option<Point> {
        self.last_center
    }

    #[must_use]
    pub fn last_distance(&self) -> Option<f64> {
        self.last_distance
    }

    /// Whether any history is recorded.
    #[must_use]
    pub fn is_warm(&self) -> bool {
        self.last_center.is_some() || self.last_distance.is_some()
    }

    /// Forget all history so the next sample starts a fresh sequence.
    pub fn reset(&mut self) {
        self.last_center = None;
        self.last_distance = None;
    }

    /// Feed the two viewport-local contact points of one sample.
    ///
    /// A zero separation on either side of the ratio leaves the scale as it
    /// is; the history is still advanced and centroid motion still pans.
    pub fn sample(&mut self, a: Point, b: Point, camera: &Camera, limits: ScaleLimits) -> PinchStep {
        let center = a.midpoint(b);
        let distance = a.distance(b);

        let Some(last_center) = self.last_center else {
            self.last_center = Some(center);
            return PinchStep::RecordedCenter;
        };
        let Some(last_distance) = self.last_distance else {
            self.last_distance = Some(distance);
            return PinchStep::RecordedDistance;
        };

        let ratio = distance / last_distance;
        let scale = if distance > 0.0 && last_distance > 0.0 && ratio.is_finite() {
            limits.clamp(camera.scale * ratio)
        } else {
            tracing::trace!(distance, last_distance, "degenerate pinch sample, scale held");
            camera.scale
        };

        let anchor_world = camera.screen_to_world(center);
        let translation = anchored_translation(anchor_world, center, scale) + (center - last_center);

        self.last_center = Some(center);
        self.last_distance = Some(distance);

        PinchStep::Moved(Camera { scale, translation })
    }
}
