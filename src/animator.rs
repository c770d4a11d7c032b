//! The viewport animation loop.
//!
//! [`ViewportAnimator`] owns every piece of mutable state the page animates:
//! scroll, pointer, camera rig, torus pose, current section and the tab
//! activity flag. DOM events feed it through the `on_*` methods and the frame
//! callback calls [`tick`](ViewportAnimator::tick) once per display refresh.
//! It touches no browser API, so the whole loop runs under plain `cargo test`.

use glam::Vec2;

use crate::camera::CameraRig;
use crate::config::{RotationMode, SceneConfig};
use crate::scroll::ScrollState;
use crate::sections::{OverlayStyle, SectionChange, SectionTracker};
use crate::smoothing::{damp_vec2, lerp_vec2};
use crate::tween::{PropertyTweener, TweenSet, TweenTarget};
use crate::viewport::{clamp_pixel_ratio, mesh_target_for_width, Cursor, Viewport};

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub camera: CameraRig,
    pub mesh_position: Vec2,
    pub mesh_rotation: Vec2,
    pub particle_rotation: f32,
    pub overlays: Vec<OverlayStyle>,
    pub delta: f32,
    pub elapsed: f64,
}

#[derive(Clone, Debug)]
pub struct ViewportAnimator {
    config: SceneConfig,
    viewport: Viewport,
    scroll: ScrollState,
    cursor: Cursor,
    camera: CameraRig,
    mesh_target: Vec2,
    mesh_position: Vec2,
    mesh_rotation: Vec2,
    sections: SectionTracker,
    tweens: TweenSet,
    active: bool,
    running: bool,
    previous_time: f64,
}

impl ViewportAnimator {
    /// Build the animator for the page as it is right now. The torus and the
    /// scroll start on their targets and the visible section is shown
    /// without a transition.
    pub fn new(config: SceneConfig, viewport: Viewport, scroll_y: f32) -> Self {
        let viewport = Viewport {
            pixel_ratio: clamp_pixel_ratio(viewport.pixel_ratio, config.max_pixel_ratio),
            ..viewport
        };
        let mesh_target = mesh_target_for_width(viewport.width, &config);
        let mut tweens = TweenSet::new();
        let mut sections = SectionTracker::new(config.section_count, config.transitions);
        sections.reset(
            crate::scroll::section_index(scroll_y, viewport.height, config.section_count),
            &mut tweens,
        );
        let mut camera = CameraRig::new(config.camera);
        camera.local.y = Self::camera_y_for(scroll_y, viewport.height, config.object_distance);

        Self {
            scroll: ScrollState::new(scroll_y, config.scroll_debounce_secs),
            cursor: Cursor::default(),
            camera,
            mesh_target,
            mesh_position: mesh_target,
            mesh_rotation: Vec2::ZERO,
            sections,
            tweens,
            active: true,
            running: false,
            previous_time: 0.0,
            viewport,
            config,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn mesh_target(&self) -> Vec2 {
        self.mesh_target
    }

    pub fn mesh_position(&self) -> Vec2 {
        self.mesh_position
    }

    pub fn mesh_rotation(&self) -> Vec2 {
        self.mesh_rotation
    }

    pub fn section(&self) -> usize {
        self.sections.current()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a frame is (or should be) pending with the scheduler.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_scrolling(&self, now: f64) -> bool {
        self.scroll.is_scrolling(now)
    }

    /// Mark the loop as scheduled. Returns false when it already was, so the
    /// caller never queues two frame callbacks.
    pub fn start(&mut self, elapsed: f64) -> bool {
        if self.running || !self.active {
            return false;
        }
        self.previous_time = elapsed;
        self.running = true;
        true
    }

    /// Advance one frame. Returns `None` when the tab is inactive, in which
    /// case the loop stops and nothing must be drawn or rescheduled.
    pub fn tick(&mut self, elapsed: f64) -> Option<FrameSnapshot> {
        if !self.active {
            self.running = false;
            return None;
        }
        self.running = true;

        let delta = (elapsed - self.previous_time).max(0.0) as f32;
        self.previous_time = elapsed;

        let scroll_y = self.scroll.smooth(self.config.scroll_smoothing);
        self.camera.local.y =
            Self::camera_y_for(scroll_y, self.viewport.height, self.config.object_distance);

        let parallax = self.cursor.parallax(self.config.parallax_amplitude);
        self.camera.group =
            damp_vec2(self.camera.group, parallax, self.config.parallax_rate, delta);

        let speed = self.config.rotation_speed;
        self.mesh_rotation = match self.config.rotation_mode {
            RotationMode::Accumulate => self.mesh_rotation + speed * delta,
            RotationMode::Absolute => speed * elapsed as f32,
        };

        self.mesh_position =
            lerp_vec2(self.mesh_position, self.mesh_target, self.config.mesh_smoothing);

        self.tweens.settle(elapsed);

        Some(FrameSnapshot {
            camera: self.camera,
            mesh_position: self.mesh_position,
            mesh_rotation: self.mesh_rotation,
            particle_rotation: self.tweens.value(TweenTarget::ParticleRotation, elapsed),
            overlays: self.sections.overlay_styles(&self.tweens, elapsed),
            delta,
            elapsed,
        })
    }

    /// Apply a new window size unless a scroll is in progress (mobile
    /// browsers resize while their toolbars slide during a scroll). Returns
    /// the viewport the drawing surface must be resized to.
    pub fn on_resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        now: f64,
    ) -> Option<Viewport> {
        if self.scroll.is_scrolling(now) {
            log::debug!("resize to {width}x{height} ignored while scrolling");
            return None;
        }
        self.viewport = Viewport::new(
            width,
            height,
            clamp_pixel_ratio(device_pixel_ratio, self.config.max_pixel_ratio),
        );
        self.mesh_target = mesh_target_for_width(width, &self.config);
        log::debug!(
            "viewport {}x{} @{}x, mesh target {:?}",
            width,
            height,
            self.viewport.pixel_ratio,
            self.mesh_target
        );
        Some(self.viewport)
    }

    pub fn on_scroll(&mut self, y: f32, now: f64) -> Option<SectionChange> {
        self.scroll.on_scroll(y, now);
        let change = self
            .sections
            .update(y, self.viewport.height, &mut self.tweens, now);
        if let Some(change) = change {
            log::info!("section {} -> {}", change.from, change.to);
        }
        change
    }

    /// Track the pointer. `on_body` tells whether the event target was the
    /// page body rather than an overlay element.
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, on_body: bool) -> bool {
        if !self.active || (self.config.pointer_body_only && !on_body) {
            return false;
        }
        self.cursor = Cursor::from_client(client_x, client_y, &self.viewport);
        true
    }

    pub fn on_blur(&mut self) {
        if self.active {
            log::debug!("tab inactive, pausing");
        }
        self.active = false;
    }

    /// Resume after a blur. The frame baseline jumps to `elapsed` so the
    /// paused time never shows up as a frame delta. Returns true when the
    /// loop had stopped and the caller must request a frame.
    pub fn on_focus(&mut self, elapsed: f64) -> bool {
        if !self.active {
            log::debug!("tab active, resuming");
        }
        self.active = true;
        self.previous_time = elapsed;
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    fn camera_y_for(scroll_y: f32, viewport_height: f64, object_distance: f32) -> f32 {
        if viewport_height <= 0.0 {
            return 0.0;
        }
        -(scroll_y / viewport_height as f32) * object_distance
    }
}
