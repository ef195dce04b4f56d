//! Scripted input replay.
//!
//! A script is a JSON document listing viewport input events in order. The
//! driver feeds them through a [`Viewport`] whose render surface records every
//! committed camera, which makes gesture behaviour reproducible outside a
//! browser. The `canvas-replay` binary prints the resulting frames as JSON
//! lines.
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "events": [
//!     { "type": "wheel", "delta_y": -100, "pointer": { "x": 400, "y": 300 } },
//!     { "type": "pointer_down", "id": 1, "x": 10, "y": 10 },
//!     { "type": "pointer_move", "id": 1, "x": 60, "y": 30 },
//!     { "type": "pointer_up", "id": 1, "x": 60, "y": 30 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::config::{ConfigError, ViewportConfig};
use crate::engine::Viewport;
use crate::input::{PointerId, WheelInput};
use crate::sync::{Action, BackgroundSync, RenderSurface};
use crate::viewport::{ViewportBounds, ViewportSize};

/// Error raised while loading or replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// One input event. Positions are client coordinates unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Resize { width: f64, height: f64 },
    /// `pointer` is in client coordinates like every other event.
    Wheel {
        delta_y: f64,
        #[serde(default)]
        pointer: Option<Point>,
    },
    PointerDown { id: i32, x: f64, y: f64 },
    PointerMove { id: i32, x: f64, y: f64 },
    PointerUp { id: i32, x: f64, y: f64 },
    /// Continuous pan with an absolute translation offset.
    DragMove { x: f64, y: f64 },
    /// Commit pan with an absolute translation offset.
    DragEnd { x: f64, y: f64 },
    Pinch { a: Point, b: Point },
    Lifted,
}

/// A parsed replay script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub viewport: ViewportSize,
    /// Client-space placement of the viewport. Defaults to the origin with
    /// the current viewport size.
    #[serde(default)]
    pub bounds: Option<ViewportBounds>,
    pub events: Vec<ReplayEvent>,
}

/// A committed camera and the index of the event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub step: usize,
    pub camera: Camera,
}

pub fn parse_script(json: &str) -> Result<ReplayScript, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &Path) -> Result<ReplayScript, ReplayError> {
    let json = fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.to_path_buf(), source })?;
    parse_script(&json)
}

/// Render surface that keeps every camera it is handed.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    cameras: Vec<Camera>,
}

impl RecordingSurface {
    #[must_use]
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }
}

impl RenderSurface for RecordingSurface {
    fn set_camera(&mut self, camera: Camera) {
        tracing::debug!(scale = camera.scale, x = camera.translation.x, y = camera.translation.y, "render camera");
        self.cameras.push(camera);
    }
}

/// Background sink that only logs.
#[derive(Debug, Default)]
pub struct LoggingBackground;

impl BackgroundSync for LoggingBackground {
    fn set_pattern_offset(&mut self, offset: Point) {
        tracing::trace!(x = offset.x, y = offset.y, "pattern offset");
    }

    fn set_pattern_density(&mut self, scale: f64) {
        tracing::trace!(scale, "pattern density");
    }
}

/// Run `script` against a fresh viewport and collect committed cameras.
///
/// The camera pushed when the viewport is created is not reported.
#[must_use]
pub fn run_script(config: ViewportConfig, script: &ReplayScript) -> Vec<ReplayFrame> {
    let mut viewport = Viewport::new(config, RecordingSurface::default(), LoggingBackground);
    viewport.on_resize(script.viewport);
    let mut bounds = script.bounds.unwrap_or_else(|| ViewportBounds::at_origin(script.viewport));

    let mut frames = Vec::new();
    for (step, event) in script.events.iter().enumerate() {
        let seen = viewport.render_surface().cameras().len();
        if let ReplayEvent::Resize { width, height } = *event {
            let size = ViewportSize::new(width, height);
            viewport.on_resize(size);
            if script.bounds.is_none() {
                bounds = ViewportBounds::at_origin(size);
            }
            continue;
        }
        let actions = apply_event(&mut viewport, *event, bounds);
        tracing::trace!(step, actions = actions.len(), "replayed event");
        frames.extend(
            viewport.render_surface().cameras().iter().skip(seen).map(|camera| ReplayFrame { step, camera: *camera }),
        );
    }
    frames
}

fn apply_event(
    viewport: &mut Viewport<RecordingSurface, LoggingBackground>,
    event: ReplayEvent,
    bounds: ViewportBounds,
) -> Vec<Action> {
    match event {
        ReplayEvent::Resize { .. } => Vec::new(),
        ReplayEvent::Wheel { delta_y, pointer } => {
            viewport.on_wheel(WheelInput { delta_y, pointer: pointer.map(|client| bounds.localize(client)) })
        }
        ReplayEvent::PointerDown { id, x, y } => viewport.on_pointer_down(PointerId(id), Point::new(x, y), bounds),
        ReplayEvent::PointerMove { id, x, y } => viewport.on_pointer_move(PointerId(id), Point::new(x, y), bounds),
        ReplayEvent::PointerUp { id, x, y } => viewport.on_pointer_up(PointerId(id), Point::new(x, y), bounds),
        ReplayEvent::DragMove { x, y } => viewport.on_drag_move(Point::new(x, y)),
        ReplayEvent::DragEnd { x, y } => viewport.on_drag_end(Point::new(x, y)),
        ReplayEvent::Pinch { a, b } => viewport.on_pinch(a, b, bounds),
        ReplayEvent::Lifted => viewport.on_all_pointers_lifted(),
    }
}
