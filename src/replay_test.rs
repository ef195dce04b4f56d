#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_script_reads_every_event_kind() {
    let json = r#"{
        "viewport": { "width": 800, "height": 600 },
        "events": [
            { "type": "resize", "width": 1024, "height": 768 },
            { "type": "wheel", "delta_y": -100, "pointer": { "x": 400, "y": 300 } },
            { "type": "wheel", "delta_y": 5 },
            { "type": "pointer_down", "id": 1, "x": 10, "y": 20 },
            { "type": "pointer_move", "id": 1, "x": 11, "y": 21 },
            { "type": "pointer_up", "id": 1, "x": 12, "y": 22 },
            { "type": "drag_move", "x": 3, "y": 4 },
            { "type": "drag_end", "x": 5, "y": 6 },
            { "type": "pinch", "a": { "x": 0, "y": 0 }, "b": { "x": 1, "y": 1 } },
            { "type": "lifted" }
        ]
    }"#;
    let script = parse_script(json).unwrap();
    assert_eq!(script.viewport, ViewportSize::new(800.0, 600.0));
    assert!(script.bounds.is_none());
    assert_eq!(script.events.len(), 10);
    assert_eq!(script.events[0], ReplayEvent::Resize { width: 1024.0, height: 768.0 });
    assert_eq!(script.events[1], ReplayEvent::Wheel { delta_y: -100.0, pointer: Some(pt(400.0, 300.0)) });
    assert_eq!(script.events[2], ReplayEvent::Wheel { delta_y: 5.0, pointer: None });
    assert_eq!(script.events[3], ReplayEvent::PointerDown { id: 1, x: 10.0, y: 20.0 });
    assert_eq!(script.events[8], ReplayEvent::Pinch { a: pt(0.0, 0.0), b: pt(1.0, 1.0) });
    assert_eq!(script.events[9], ReplayEvent::Lifted);
}

#[test]
fn parse_script_rejects_unknown_event() {
    let err = parse_script(r#"{ "events": [ { "type": "teleport" } ] }"#).unwrap_err();
    assert!(matches!(err, ReplayError::Json(_)));
}

#[test]
fn parse_script_requires_events() {
    assert!(parse_script(r#"{ "viewport": { "width": 1, "height": 1 } }"#).is_err());
}

#[test]
fn load_script_reports_missing_file() {
    let path = Path::new("definitely/not/here/script.json");
    let err = load_script(path).unwrap_err();
    match err {
        ReplayError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ReplayError::Read, got {other:?}"),
    }
}

// =============================================================
// Running
// =============================================================

#[test]
fn wheel_event_yields_one_frame() {
    let script = ReplayScript {
        viewport: ViewportSize::new(800.0, 600.0),
        bounds: None,
        events: vec![ReplayEvent::Wheel { delta_y: -100.0, pointer: Some(pt(400.0, 300.0)) }],
    };
    let frames = run_script(ViewportConfig::default(), &script);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].step, 0);
    assert!(approx_eq(frames[0].camera.scale, (0.65_f64).exp()));
}

#[test]
fn wheel_pointer_is_localized_like_pointer_events() {
    let script = ReplayScript {
        viewport: ViewportSize::new(800.0, 600.0),
        bounds: Some(ViewportBounds { left: 100.0, top: 50.0, width: 800.0, height: 600.0 }),
        events: vec![ReplayEvent::Wheel { delta_y: -100.0, pointer: Some(pt(500.0, 350.0)) }],
    };
    let frames = run_script(ViewportConfig::default(), &script);
    assert_eq!(frames.len(), 1);
    let factor = (0.65_f64).exp();
    let camera = frames[0].camera;
    assert!(approx_eq(camera.translation.x, 400.0 - 400.0 * factor));
    assert!(approx_eq(camera.translation.y, 300.0 - 300.0 * factor));
}

#[test]
fn pointer_drag_commits_once_on_release() {
    let script = ReplayScript {
        viewport: ViewportSize::new(800.0, 600.0),
        bounds: Some(ViewportBounds { left: 100.0, top: 50.0, width: 800.0, height: 600.0 }),
        events: vec![
            ReplayEvent::PointerDown { id: 7, x: 200.0, y: 150.0 },
            ReplayEvent::PointerMove { id: 7, x: 220.0, y: 140.0 },
            ReplayEvent::PointerMove { id: 7, x: 260.0, y: 130.0 },
            ReplayEvent::PointerUp { id: 7, x: 260.0, y: 130.0 },
        ],
    };
    let frames = run_script(ViewportConfig::default(), &script);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].step, 3);
    assert_eq!(frames[0].camera.translation, pt(60.0, -20.0));
}

#[test]
fn resize_moves_default_bounds_but_not_camera() {
    let script = ReplayScript {
        viewport: ViewportSize::new(100.0, 100.0),
        bounds: None,
        events: vec![
            ReplayEvent::Resize { width: 500.0, height: 500.0 },
            ReplayEvent::DragMove { x: 1.0, y: 1.0 },
            ReplayEvent::DragEnd { x: 2.0, y: 2.0 },
        ],
    };
    let frames = run_script(ViewportConfig::default(), &script);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].step, 2);
    assert_eq!(frames[0].camera.translation, pt(2.0, 2.0));
}

#[test]
fn pinch_script_respects_configured_limits() {
    let config = ViewportConfig { max_scale: 1.5, ..ViewportConfig::default() };
    let script = ReplayScript {
        viewport: ViewportSize::new(800.0, 600.0),
        bounds: None,
        events: vec![
            ReplayEvent::Pinch { a: pt(100.0, 100.0), b: pt(200.0, 100.0) },
            ReplayEvent::Pinch { a: pt(100.0, 100.0), b: pt(200.0, 100.0) },
            ReplayEvent::Pinch { a: pt(0.0, 100.0), b: pt(300.0, 100.0) },
            ReplayEvent::Lifted,
        ],
    };
    let frames = run_script(config, &script);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].step, 2);
    assert_eq!(frames[0].camera.scale, 1.5);
}

#[test]
fn frames_serialize_as_json_lines() {
    let frame = ReplayFrame { step: 4, camera: Camera { scale: 2.0, translation: pt(1.5, -3.0) } };
    let line = serde_json::to_string(&frame).unwrap();
    assert_eq!(line, r#"{"step":4,"camera":{"scale":2.0,"translation":{"x":1.5,"y":-3.0}}}"#);
}
