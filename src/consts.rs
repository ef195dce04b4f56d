//! Shared numeric constants for the viewport crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed camera scale (10%).
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed camera scale (1000%).
pub const MAX_SCALE: f64 = 10.0;

/// Exponential wheel response, per unit of screen-space scroll delta.
pub const WHEEL_ZOOM_INTENSITY: f64 = 0.0065;

// ── Background grid ─────────────────────────────────────────────

/// Distance between grid dots at scale 1, in CSS pixels.
pub const GRID_BASE_GAP_PX: f64 = 100.0;

/// Radius of a single grid dot, in CSS pixels.
pub const GRID_DOT_RADIUS_PX: f64 = 0.8;

/// Surface colour behind the grid.
pub const GRID_BACKGROUND_COLOR: &str = "#f8fafc";

/// Grid dot colour.
pub const GRID_DOT_COLOR: &str = "#cbd5e1";
