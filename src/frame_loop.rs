use crate::animator::{FrameSnapshot, ViewportAnimator};
use crate::clock::Clock;
use crate::sections::SectionChange;
use crate::viewport::Viewport;

/// Something that can put a [`FrameSnapshot`] on screen.
pub trait SceneRenderer {
    /// Match the drawing surface and projection to a new viewport.
    fn resize(&mut self, viewport: &Viewport);

    fn render(&mut self, frame: &FrameSnapshot);
}

/// What the frame callback should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Request another animation frame.
    Continue,
    /// Let the loop lapse until focus returns.
    Stop,
}

/// Binds the animator to a renderer and a clock. The browser glue owns one
/// of these and forwards events and frame callbacks to it.
pub struct AnimationLoop<R, C> {
    animator: ViewportAnimator,
    renderer: R,
    clock: C,
    rendered: u64,
}

impl<R: SceneRenderer, C: Clock> AnimationLoop<R, C> {
    /// The renderer is sized to the animator's viewport before the first
    /// frame.
    pub fn new(animator: ViewportAnimator, mut renderer: R, clock: C) -> Self {
        renderer.resize(animator.viewport());
        Self {
            animator,
            renderer,
            clock,
            rendered: 0,
        }
    }

    pub fn animator(&self) -> &ViewportAnimator {
        &self.animator
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn render_count(&self) -> u64 {
        self.rendered
    }

    /// Returns true when the caller must request the first frame.
    pub fn start(&mut self) -> bool {
        self.animator.start(self.clock.elapsed())
    }

    pub fn frame(&mut self) -> Schedule {
        match self.animator.tick(self.clock.elapsed()) {
            Some(snapshot) => {
                self.renderer.render(&snapshot);
                self.rendered += 1;
                Schedule::Continue
            }
            None => Schedule::Stop,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        let now = self.clock.elapsed();
        match self.animator.on_resize(width, height, device_pixel_ratio, now) {
            Some(viewport) => {
                self.renderer.resize(&viewport);
                true
            }
            None => false,
        }
    }

    pub fn scroll(&mut self, y: f32) -> Option<SectionChange> {
        let now = self.clock.elapsed();
        self.animator.on_scroll(y, now)
    }

    pub fn pointer(&mut self, client_x: f64, client_y: f64, on_body: bool) -> bool {
        self.animator.on_pointer_move(client_x, client_y, on_body)
    }

    pub fn blur(&mut self) {
        self.animator.on_blur();
    }

    /// Returns true when the caller must request a frame to restart the
    /// loop.
    pub fn focus(&mut self) -> bool {
        self.animator.on_focus(self.clock.elapsed())
    }
}
