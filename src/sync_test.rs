#![allow(clippy::float_cmp)]

use super::*;

#[derive(Default)]
struct Recorder {
    cameras: Vec<Camera>,
    offsets: Vec<Point>,
    densities: Vec<f64>,
}

impl RenderSurface for Recorder {
    fn set_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }
}

impl BackgroundSync for Recorder {
    fn set_pattern_offset(&mut self, offset: Point) {
        self.offsets.push(offset);
    }

    fn set_pattern_density(&mut self, scale: f64) {
        self.densities.push(scale);
    }
}

// =============================================================
// dispatch
// =============================================================

#[test]
fn dispatch_routes_each_action() {
    let camera = Camera { scale: 2.0, translation: Point::new(5.0, 6.0) };
    let actions = [
        Action::PreventDefault,
        Action::SetCamera(camera),
        Action::SetPatternOffset(Point::new(5.0, 6.0)),
        Action::SetPatternDensity(2.0),
    ];
    let mut render = Recorder::default();
    let mut grid = Recorder::default();
    dispatch(&actions, &mut render, &mut grid);

    assert_eq!(render.cameras, vec![camera]);
    assert!(render.offsets.is_empty());
    assert_eq!(grid.offsets, vec![Point::new(5.0, 6.0)]);
    assert_eq!(grid.densities, vec![2.0]);
    assert!(grid.cameras.is_empty());
}

#[test]
fn dispatch_empty_is_noop() {
    let mut render = Recorder::default();
    let mut grid = Recorder::default();
    dispatch(&[], &mut render, &mut grid);
    assert!(render.cameras.is_empty());
    assert!(grid.offsets.is_empty());
}

// =============================================================
// commit_actions
// =============================================================

#[test]
fn commit_actions_with_scale_change_include_density() {
    let prev = Camera::default();
    let next = Camera { scale: 1.5, translation: Point::new(-10.0, 4.0) };
    assert_eq!(
        commit_actions(&prev, &next),
        vec![
            Action::SetCamera(next),
            Action::SetPatternOffset(Point::new(-10.0, 4.0)),
            Action::SetPatternDensity(1.5),
        ]
    );
}

#[test]
fn commit_actions_pan_only_skip_density() {
    let prev = Camera::default();
    let next = Camera { scale: 1.0, translation: Point::new(30.0, 0.0) };
    let actions = commit_actions(&prev, &next);
    assert_eq!(actions.len(), 2);
    assert!(!actions.iter().any(|a| matches!(a, Action::SetPatternDensity(_))));
}

// =============================================================
// GridStyle
// =============================================================

#[test]
fn grid_spacing_is_linear_in_scale() {
    let grid = GridStyle::default();
    assert_eq!(grid.spacing(1.0), 100.0);
    assert_eq!(grid.spacing(0.5), 50.0);
    assert_eq!(grid.spacing(4.0), 400.0);
}

#[test]
fn grid_css_values() {
    let grid = GridStyle::default();
    assert_eq!(grid.background_size_css(2.0), "200px 200px");
    assert_eq!(GridStyle::background_position_css(Point::new(-12.5, 40.0)), "-12.5px 40px");
    assert_eq!(grid.background_image_css(), "radial-gradient(#cbd5e1 0.8px, transparent 0.8px)");
    assert_eq!(grid.background_color, "#f8fafc");
}
