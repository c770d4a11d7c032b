//! Scroll-driven WebGL background: a toon-shaded torus and a colored point
//! cloud seen through a camera that follows the page scroll and leans toward
//! the pointer.
//!
//! Everything outside [`wasm`] is plain state and math and builds on any
//! target; the browser glue is only compiled for `wasm32`.

pub mod animator;
pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod scroll;
pub mod sections;
pub mod smoothing;
pub mod tween;
pub mod viewport;

pub use animator::{FrameSnapshot, ViewportAnimator};
pub use config::{RotationMode, SceneConfig};
pub use error::{ConfigError, SceneError};
pub use frame_loop::{AnimationLoop, SceneRenderer, Schedule};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::animator::ViewportAnimator;
    use crate::config::SceneConfig;
    use crate::error::SceneError;
    use crate::frame_loop::AnimationLoop;
    use crate::viewport::Viewport;

    mod dom;
    mod events;
    mod gradient;
    mod overlay;
    mod render;
    mod shaders;

    type SharedLoop = Rc<RefCell<AnimationLoop<dom::BrowserScene, dom::PerformanceClock>>>;

    impl From<SceneError> for JsValue {
        fn from(err: SceneError) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas = dom::query::<web_sys::HtmlCanvasElement>(&document, "canvas.webgl")?;
        let mut config = SceneConfig::default();
        let dataset = canvas.dataset();
        let applied = config
            .apply_overrides(|key| dataset.get(key))
            .map_err(SceneError::from)?;
        if !applied.is_empty() {
            log::info!("config overrides: {}", applied.join(", "));
        }

        let overlays = dom::query_all::<web_sys::HtmlElement>(&document, "section")?;
        if overlays.len() < config.section_count {
            return Err(SceneError::MissingElement(format!(
                "{} section elements (found {})",
                config.section_count,
                overlays.len()
            ))
            .into());
        }

        let viewport = Viewport::new(
            dom::inner_width(&window)?,
            dom::inner_height(&window)?,
            window.device_pixel_ratio(),
        );
        let scroll_y = window.scroll_y()? as f32;

        let scene = dom::BrowserScene::new(canvas, overlays, &config)?;
        let clock = dom::PerformanceClock::new(&window)?;
        let animator = ViewportAnimator::new(config, viewport, scroll_y);
        log::info!(
            "scene ready: {}x{} @{}x, section {}",
            viewport.width,
            viewport.height,
            animator.viewport().pixel_ratio,
            animator.section()
        );

        let state: SharedLoop = Rc::new(RefCell::new(AnimationLoop::new(animator, scene, clock)));
        let frames = events::FrameRequester::install(state.clone());
        events::listen(&window, &document, state.clone(), frames.clone())?;

        if state.borrow_mut().start() {
            frames.request()?;
        }
        Ok(())
    }
}
