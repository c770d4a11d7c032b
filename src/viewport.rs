use glam::Vec2;

use crate::config::SceneConfig;

/// Size of the drawing surface in CSS pixels plus the clamped device pixel
/// ratio used for the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            return 1.0;
        }
        (self.width / self.height) as f32
    }

    /// Backing-store size in device pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round().max(1.0);
        let h = (self.height * self.pixel_ratio).round().max(1.0);
        (w as u32, h as u32)
    }
}

pub fn clamp_pixel_ratio(device_ratio: f64, max: f64) -> f64 {
    if !device_ratio.is_finite() || device_ratio <= 0.0 {
        return 1.0;
    }
    device_ratio.min(max)
}

/// Where the torus should rest for a viewport of this width. Narrow screens
/// center it, wide screens push it aside to leave room for the text.
pub fn mesh_target_for_width(width: f64, config: &SceneConfig) -> Vec2 {
    if width <= config.breakpoint_px {
        config.mobile_mesh_position
    } else {
        config.desktop_mesh_position
    }
}

/// Pointer position relative to the viewport center, each axis in
/// [-0.5, 0.5].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    pub fn from_client(client_x: f64, client_y: f64, viewport: &Viewport) -> Self {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Self::default();
        }
        let x = (client_x / viewport.width - 0.5).clamp(-0.5, 0.5);
        let y = (client_y / viewport.height - 0.5).clamp(-0.5, 0.5);
        Self {
            x: x as f32,
            y: y as f32,
        }
    }

    /// Camera-rig offset this pointer position asks for. Screen y grows
    /// downward, world y upward.
    pub fn parallax(&self, amplitude: f32) -> Vec2 {
        Vec2::new(self.x * amplitude, -self.y * amplitude)
    }
}
