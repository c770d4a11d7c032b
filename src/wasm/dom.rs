use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Performance, Window};

use crate::animator::FrameSnapshot;
use crate::clock::Clock;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::frame_loop::SceneRenderer;
use crate::viewport::Viewport;

use super::overlay::OverlayLayer;
use super::render::WebGlRenderer;

pub fn js_error(err: JsValue) -> SceneError {
    SceneError::Js(format!("{err:?}"))
}

/// First element matching `selector`, which must exist and have type `T`.
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T, SceneError> {
    document
        .query_selector(selector)
        .map_err(js_error)?
        .ok_or_else(|| SceneError::MissingElement(selector.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| SceneError::MissingElement(selector.to_string()))
}

pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, SceneError> {
    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .map(|node| {
            node.dyn_into::<T>()
                .map_err(|_| SceneError::MissingElement(selector.to_string()))
        })
        .collect()
}

pub fn inner_width(window: &Window) -> Result<f64, JsValue> {
    window.inner_width()?.as_f64().ok_or_else(|| "innerWidth".into())
}

pub fn inner_height(window: &Window) -> Result<f64, JsValue> {
    window.inner_height()?.as_f64().ok_or_else(|| "innerHeight".into())
}

/// Seconds since construction, from `performance.now()`.
pub struct PerformanceClock {
    performance: Performance,
    origin: f64,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Result<Self, SceneError> {
        let performance = window
            .performance()
            .ok_or_else(|| SceneError::Js("performance API unavailable".into()))?;
        let origin = performance.now();
        Ok(Self {
            performance,
            origin,
        })
    }
}

impl Clock for PerformanceClock {
    fn elapsed(&self) -> f64 {
        (self.performance.now() - self.origin) / 1000.0
    }
}

/// The page as the loop sees it: the WebGL canvas plus the text overlays.
pub struct BrowserScene {
    gl: WebGlRenderer,
    overlays: OverlayLayer,
}

impl BrowserScene {
    pub fn new(
        canvas: HtmlCanvasElement,
        overlays: Vec<HtmlElement>,
        config: &SceneConfig,
    ) -> Result<Self, SceneError> {
        Ok(Self {
            gl: WebGlRenderer::new(canvas, config)?,
            overlays: OverlayLayer::new(overlays),
        })
    }
}

impl SceneRenderer for BrowserScene {
    fn resize(&mut self, viewport: &Viewport) {
        self.gl.resize(viewport);
    }

    fn render(&mut self, frame: &FrameSnapshot) {
        self.gl.render(frame);
        self.overlays.apply(&frame.overlays);
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL};

    use super::super::gradient;
    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    #[wasm_bindgen_test]
    fn missing_element_names_selector() {
        let err = query::<HtmlCanvasElement>(&document(), "canvas.missing").unwrap_err();
        assert!(matches!(err, SceneError::MissingElement(ref s) if s == "canvas.missing"));
    }

    #[wasm_bindgen_test]
    fn wrong_element_type_is_missing() {
        let doc = document();
        let div = doc.create_element("div").unwrap();
        div.set_class_name("not-a-canvas");
        doc.body().unwrap().append_child(&div).unwrap();
        let err = query::<HtmlCanvasElement>(&doc, "div.not-a-canvas").unwrap_err();
        assert!(matches!(err, SceneError::MissingElement(_)));
        div.remove();
    }

    #[wasm_bindgen_test]
    fn unloadable_gradient_keeps_fallback_bands() {
        let canvas = document()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        let Some(context) = canvas.get_context("webgl2").unwrap() else {
            log::warn!("no webgl2 in this browser, skipping");
            return;
        };
        let gl: GL = context.dyn_into().unwrap();

        let texture = gradient::load(&gl, "textures/gradients/does-not-exist.jpg").unwrap();
        assert!(gl.is_texture(Some(&texture)));

        let fb = gl.create_framebuffer().unwrap();
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&fb));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_2D,
            Some(&texture),
            0,
        );
        let mut pixels = [0u8; 12];
        gl.read_pixels_with_opt_u8_array(0, 0, 3, 1, GL::RGBA, GL::UNSIGNED_BYTE, Some(&mut pixels))
            .unwrap();
        assert_eq!(pixels, gradient::FALLBACK_BANDS);
    }
}
