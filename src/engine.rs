use crate::camera::{Camera, Point, ScaleLimits};
use crate::config::ViewportConfig;
use crate::gesture::{GestureCommand, GestureEvent, GestureMachine, GesturePhase};
use crate::input::{PointerId, PointerSet, WheelInput};
use crate::pan::{Drag, PanTracker};
use crate::pinch::{PinchStep, PinchTracker};
use crate::sync::{Action, BackgroundSync, RenderSurface, commit_actions, dispatch};
use crate::viewport::{ViewportBounds, ViewportSize, WorldRect, visible_world_rect};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Live view telemetry for status displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub cursor_world: Option<Point>,
    pub viewport_center_world: Point,
    pub zoom: f64,
}

/// Core viewport state — all logic that doesn't depend on a browser.
///
/// Handlers mutate the camera and return the [`Action`]s the host must apply.
/// Separated from [`Viewport`] so it can be tested without any sinks.
#[derive(Debug)]
pub struct ViewportCore {
    pub camera: Camera,
    pub size: ViewportSize,
    pub gesture: GestureMachine,
    pub pointers: PointerSet,
    pub pan: PanTracker,
    pub pinch: PinchTracker,
    pub drag: Option<Drag>,
    config: ViewportConfig,
}

impl Default for ViewportCore {
    fn default() -> Self {
        Self::with_config(ViewportConfig::default())
    }
}

impl ViewportCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ViewportConfig) -> Self {
        Self {
            camera: Camera::default(),
            size: ViewportSize::default(),
            gesture: GestureMachine::new(),
            pointers: PointerSet::new(),
            pan: PanTracker::new(),
            pinch: PinchTracker::new(),
            drag: None,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn limits(&self) -> ScaleLimits {
        self.config.limits()
    }

    // --- Viewport ---

    /// Update viewport dimensions. Never touches the camera.
    pub fn on_resize(&mut self, size: ViewportSize) {
        self.size = size;
    }

    /// Actions that bring freshly attached sinks up to date.
    #[must_use]
    pub fn initial_actions(&self) -> Vec<Action> {
        vec![
            Action::SetCamera(self.camera),
            Action::SetPatternOffset(self.camera.translation),
            Action::SetPatternDensity(self.camera.scale),
        ]
    }

    // --- Wheel ---

    /// Zoom about the pointer by `exp(-delta_y * intensity)`.
    ///
    /// The event is always consumed. Without a pointer position (or with a
    /// non-finite delta) the camera is left alone.
    pub fn on_wheel(&mut self, input: WheelInput) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];
        let Some(pointer) = input.pointer else {
            return actions;
        };
        if !input.delta_y.is_finite() {
            return actions;
        }

        let factor = (-input.delta_y * self.config.wheel_intensity).exp();
        let next = self.camera.zoomed_about(pointer, self.camera.scale * factor, self.limits());
        actions.extend(self.commit(next));
        actions
    }

    // --- Drag ---

    /// Continuous pan phase: show `offset` on the grid only.
    pub fn on_drag_move(&mut self, offset: Point) -> Vec<Action> {
        self.pan.show(offset)
    }

    /// Commit pan phase: write `offset` into the camera.
    pub fn on_drag_end(&mut self, offset: Point) -> Vec<Action> {
        self.pan.commit(&mut self.camera, offset)
    }

    // --- Pinch ---

    /// One two-pointer sample in client coordinates.
    ///
    /// Entering the pinch from a drag cancels that drag first; an offset
    /// shown through [`ViewportCore::on_drag_move`] is committed as well.
    pub fn on_pinch(&mut self, a: Point, b: Point, bounds: ViewportBounds) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.gesture.phase() != GesturePhase::TrackingPinch {
            let commands = self.gesture.transition(GestureEvent::Down { active: 2, at: bounds.localize(b) });
            actions.extend(self.run(commands));
            actions.extend(self.pan.settle(&mut self.camera));
        }
        actions.extend(self.pinch_sample(bounds.localize(a), bounds.localize(b)));
        actions
    }

    /// Every pointer lifted. Clears all gesture state.
    pub fn on_all_pointers_lifted(&mut self) -> Vec<Action> {
        self.pointers.clear();
        let commands = self.gesture.transition(GestureEvent::Up { active: 0, remaining: None });
        self.run(commands)
    }

    // --- Pointer events ---

    pub fn on_pointer_down(&mut self, id: PointerId, client: Point, bounds: ViewportBounds) -> Vec<Action> {
        let at = bounds.localize(client);
        if !self.pointers.press(id, at) {
            return Vec::new();
        }
        let commands = self.gesture.transition(GestureEvent::Down { active: self.pointers.len(), at });
        self.run(commands)
    }

    pub fn on_pointer_move(&mut self, id: PointerId, client: Point, bounds: ViewportBounds) -> Vec<Action> {
        let at = bounds.localize(client);
        if !self.pointers.update(id, at) {
            return Vec::new();
        }
        match self.gesture.phase() {
            GesturePhase::TrackingSingle => match self.drag {
                Some(drag) => self.on_drag_move(drag.offset_for(at)),
                None => Vec::new(),
            },
            GesturePhase::TrackingPinch => match self.pointers.pair() {
                Some((a, b)) => self.pinch_sample(a, b),
                None => Vec::new(),
            },
            GesturePhase::Idle | GesturePhase::Parked => Vec::new(),
        }
    }

    /// Pointer released or cancelled.
    pub fn on_pointer_up(&mut self, id: PointerId, client: Point, bounds: ViewportBounds) -> Vec<Action> {
        self.pointers.update(id, bounds.localize(client));
        if !self.pointers.release(id) {
            return Vec::new();
        }
        let event = GestureEvent::Up { active: self.pointers.len(), remaining: self.pointers.first() };
        let commands = self.gesture.transition(event);
        self.run(commands)
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The offset the grid currently shows: the in-flight drag offset, or
    /// the committed translation.
    #[must_use]
    pub fn pattern_offset(&self) -> Point {
        self.pan.presentation().unwrap_or(self.camera.translation)
    }

    /// World-space rectangle visible through the viewport.
    #[must_use]
    pub fn visible_world_rect(&self) -> WorldRect {
        visible_world_rect(&self.camera, self.size)
    }

    /// World-space point at the viewport center.
    #[must_use]
    pub fn viewport_center_world(&self) -> Point {
        self.camera.screen_to_world(self.size.center())
    }

    /// Telemetry snapshot; `cursor` is viewport-local.
    #[must_use]
    pub fn view_state(&self, cursor: Option<Point>) -> ViewState {
        ViewState {
            cursor_world: cursor.map(|p| self.camera.screen_to_world(p)),
            viewport_center_world: self.viewport_center_world(),
            zoom: self.camera.scale,
        }
    }

    // --- Internals ---

    fn pinch_sample(&mut self, a: Point, b: Point) -> Vec<Action> {
        let limits = self.limits();
        match self.pinch.sample(a, b, &self.camera, limits) {
            PinchStep::Moved(next) => self.commit(next),
            PinchStep::RecordedCenter | PinchStep::RecordedDistance => Vec::new(),
        }
    }

    fn commit(&mut self, next: Camera) -> Vec<Action> {
        let previous = self.camera;
        self.camera = next;
        tracing::trace!(scale = next.scale, x = next.translation.x, y = next.translation.y, "camera committed");
        commit_actions(&previous, &next)
    }

    fn run(&mut self, commands: Vec<GestureCommand>) -> Vec<Action> {
        let mut actions = Vec::new();
        for command in commands {
            match command {
                GestureCommand::BeginDrag(at) | GestureCommand::ResumeDrag(at) => {
                    self.drag = Some(Drag::start(at, self.camera.translation));
                }
                GestureCommand::CancelDrag | GestureCommand::EndDrag => {
                    self.drag = None;
                    actions.extend(self.pan.settle(&mut self.camera));
                }
                GestureCommand::ResetPinch => self.pinch.reset(),
            }
        }
        actions
    }
}

/// The full viewport controller: a [`ViewportCore`] wired to its sinks.
pub struct Viewport<R, B> {
    pub core: ViewportCore,
    render: R,
    background: B,
}

impl<R: RenderSurface, B: BackgroundSync> Viewport<R, B> {
    /// Create a controller and bring both sinks up to date.
    pub fn new(config: ViewportConfig, render: R, background: B) -> Self {
        let mut viewport = Self { core: ViewportCore::with_config(config), render, background };
        let actions = viewport.core.initial_actions();
        viewport.apply(actions);
        viewport
    }

    #[must_use]
    pub fn render_surface(&self) -> &R {
        &self.render
    }

    #[must_use]
    pub fn background(&self) -> &B {
        &self.background
    }

    pub fn on_resize(&mut self, size: ViewportSize) {
        self.core.on_resize(size);
    }

    pub fn on_wheel(&mut self, input: WheelInput) -> Vec<Action> {
        let actions = self.core.on_wheel(input);
        self.apply(actions)
    }

    pub fn on_drag_move(&mut self, offset: Point) -> Vec<Action> {
        let actions = self.core.on_drag_move(offset);
        self.apply(actions)
    }

    pub fn on_drag_end(&mut self, offset: Point) -> Vec<Action> {
        let actions = self.core.on_drag_end(offset);
        self.apply(actions)
    }

    pub fn on_pinch(&mut self, a: Point, b: Point, bounds: ViewportBounds) -> Vec<Action> {
        let actions = self.core.on_pinch(a, b, bounds);
        self.apply(actions)
    }

    pub fn on_all_pointers_lifted(&mut self) -> Vec<Action> {
        let actions = self.core.on_all_pointers_lifted();
        self.apply(actions)
    }

    pub fn on_pointer_down(&mut self, id: PointerId, client: Point, bounds: ViewportBounds) -> Vec<Action> {
        let actions = self.core.on_pointer_down(id, client, bounds);
        self.apply(actions)
    }

    pub fn on_pointer_move(&mut self, id: PointerId, client: Point, bounds: ViewportBounds) -> Vec<Action> {
        let actions = self.core.on_pointer_move(id, client, bounds);
        self.apply(actions)
    }

    pub fn on_pointer_up(&mut self, id: PointerId, client: Point, bounds: ViewportBounds) -> Vec<Action> {
        let actions = self.core.on_pointer_up(id, client, bounds);
        self.apply(actions)
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    /// Dispatch to the sinks and hand the actions back for host-level
    /// handling (e.g. [`Action::PreventDefault`]).
    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        dispatch(&actions, &mut self.render, &mut self.background);
        actions
    }
}
