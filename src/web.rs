//! Browser bridge.
//!
//! [`WebViewport`] is exported to JavaScript. The host forwards DOM events in
//! client coordinates; the bridge localizes them against the container's
//! bounding rect, writes grid CSS straight onto the container
//! ([`ElementBackground`]) and hands committed cameras to a JS callback
//! ([`JsRenderSurface`]).

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::camera::{Camera, Point};
use crate::config::ViewportConfig;
use crate::engine::Viewport;
use crate::input::{PointerId, WheelInput};
use crate::sync::{Action, BackgroundSync, GridStyle, RenderSurface};
use crate::viewport::{ViewportBounds, ViewportSize};

/// Style declarations that never change while the viewport lives.
#[must_use]
pub fn static_declarations(grid: &GridStyle) -> [(&'static str, String); 2] {
    [("background-color", grid.background_color.clone()), ("background-image", grid.background_image_css())]
}

/// Whether the host should call `preventDefault()` on the source event.
#[must_use]
pub fn prevents_default(actions: &[Action]) -> bool {
    actions.contains(&Action::PreventDefault)
}

/// Grid sink that writes CSS background properties on an element.
pub struct ElementBackground {
    element: HtmlElement,
    grid: GridStyle,
}

impl ElementBackground {
    #[must_use]
    pub fn new(element: HtmlElement, grid: GridStyle) -> Self {
        let background = Self { element, grid };
        for (property, value) in static_declarations(&background.grid) {
            background.set(property, &value);
        }
        background
    }

    fn set(&self, property: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(property, value) {
            tracing::warn!(property, ?err, "failed to update grid style");
        }
    }
}

impl BackgroundSync for ElementBackground {
    fn set_pattern_offset(&mut self, offset: Point) {
        self.set("background-position", &GridStyle::background_position_css(offset));
    }

    fn set_pattern_density(&mut self, scale: f64) {
        let size = self.grid.background_size_css(scale);
        self.set("background-size", &size);
    }
}

/// Render sink that calls `callback(scale, tx, ty)` for every committed camera.
pub struct JsRenderSurface {
    callback: Option<js_sys::Function>,
}

impl JsRenderSurface {
    #[must_use]
    pub fn new(callback: Option<js_sys::Function>) -> Self {
        Self { callback }
    }
}

impl RenderSurface for JsRenderSurface {
    fn set_camera(&mut self, camera: Camera) {
        let Some(callback) = &self.callback else {
            return;
        };
        let result = callback.call3(
            &JsValue::NULL,
            &JsValue::from_f64(camera.scale),
            &JsValue::from_f64(camera.translation.x),
            &JsValue::from_f64(camera.translation.y),
        );
        if let Err(err) = result {
            tracing::warn!(?err, "camera callback failed");
        }
    }
}

#[wasm_bindgen]
pub struct WebViewport {
    inner: Viewport<JsRenderSurface, ElementBackground>,
    container: HtmlElement,
}

#[wasm_bindgen]
impl WebViewport {
    /// Attach to `container` with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, on_camera: Option<js_sys::Function>) -> WebViewport {
        Self::build(container, on_camera, ViewportConfig::default())
    }

    /// Attach with a JSON-encoded `ViewportConfig`; missing fields use defaults.
    pub fn with_config(
        container: HtmlElement,
        on_camera: Option<js_sys::Function>,
        config_json: &str,
    ) -> Result<WebViewport, JsValue> {
        let config: ViewportConfig =
            serde_json::from_str(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        config.validate().map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self::build(container, on_camera, config))
    }

    /// Re-read the container size. Call from a resize observer.
    pub fn resize(&mut self) {
        let bounds = self.bounds();
        self.inner.on_resize(ViewportSize::new(bounds.width, bounds.height));
    }

    /// Returns `true` when the host should prevent the browser default.
    pub fn wheel(&mut self, delta_y: f64, client_x: f64, client_y: f64) -> bool {
        let pointer = self.bounds().localize(Point::new(client_x, client_y));
        prevents_default(&self.inner.on_wheel(WheelInput { delta_y, pointer: Some(pointer) }))
    }

    /// Wheel event whose pointer position is unknown. Consumed, camera unchanged.
    pub fn wheel_without_pointer(&mut self, delta_y: f64) -> bool {
        prevents_default(&self.inner.on_wheel(WheelInput { delta_y, pointer: None }))
    }

    pub fn drag_move(&mut self, offset_x: f64, offset_y: f64) {
        self.inner.on_drag_move(Point::new(offset_x, offset_y));
    }

    pub fn drag_end(&mut self, offset_x: f64, offset_y: f64) {
        self.inner.on_drag_end(Point::new(offset_x, offset_y));
    }

    pub fn pointer_down(&mut self, id: i32, client_x: f64, client_y: f64) {
        let bounds = self.bounds();
        self.inner.on_pointer_down(PointerId(id), Point::new(client_x, client_y), bounds);
    }

    pub fn pointer_move(&mut self, id: i32, client_x: f64, client_y: f64) {
        let bounds = self.bounds();
        self.inner.on_pointer_move(PointerId(id), Point::new(client_x, client_y), bounds);
    }

    pub fn pointer_up(&mut self, id: i32, client_x: f64, client_y: f64) {
        let bounds = self.bounds();
        self.inner.on_pointer_up(PointerId(id), Point::new(client_x, client_y), bounds);
    }

    pub fn pinch(&mut self, ax: f64, ay: f64, bx: f64, by: f64) {
        let bounds = self.bounds();
        self.inner.on_pinch(Point::new(ax, ay), Point::new(bx, by), bounds);
    }

    pub fn all_pointers_lifted(&mut self) {
        self.inner.on_all_pointers_lifted();
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.inner.camera().scale
    }

    #[must_use]
    pub fn translation_x(&self) -> f64 {
        self.inner.camera().translation.x
    }

    #[must_use]
    pub fn translation_y(&self) -> f64 {
        self.inner.camera().translation.y
    }

    /// `[x, y]` in world space for a viewport-local screen point.
    #[must_use]
    pub fn screen_to_world(&self, x: f64, y: f64) -> Vec<f64> {
        let world = self.inner.camera().screen_to_world(Point::new(x, y));
        vec![world.x, world.y]
    }

    /// `[x, y]` in viewport-local screen space for a world point.
    #[must_use]
    pub fn world_to_screen(&self, x: f64, y: f64) -> Vec<f64> {
        let screen = self.inner.camera().world_to_screen(Point::new(x, y));
        vec![screen.x, screen.y]
    }
}

impl WebViewport {
    fn build(container: HtmlElement, on_camera: Option<js_sys::Function>, config: ViewportConfig) -> Self {
        let background = ElementBackground::new(container.clone(), config.grid.clone());
        let inner = Viewport::new(config, JsRenderSurface::new(on_camera), background);
        let mut viewport = WebViewport { inner, container };
        viewport.resize();
        viewport
    }

    fn bounds(&self) -> ViewportBounds {
        let rect = self.container.get_bounding_client_rect();
        ViewportBounds { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() }
    }
}
