//! Tunable constants for the scene and the loop.
//!
//! Every number the animation depends on lives in [`SceneConfig`]. The page
//! can override a handful of them through `data-*` attributes on the canvas,
//! see [`SceneConfig::apply_overrides`].

use glam::Vec2;

use crate::error::ConfigError;
use crate::tween::Easing;

/// How the torus rotation advances each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationMode {
    /// `rotation += speed * dt`. Drifts under variable frame rates and keeps
    /// its angle across pauses.
    #[default]
    Accumulate,
    /// `rotation = speed * elapsed`. Fully determined by the clock.
    Absolute,
}

impl RotationMode {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "accumulate" => Some(RotationMode::Accumulate),
            "absolute" => Some(RotationMode::Absolute),
            _ => None,
        }
    }
}

/// Perspective camera parameters. The camera sits on the view axis inside
/// the rig group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 35.0,
            near: 1.0,
            far: 100.0,
            distance: 6.0,
        }
    }
}

/// Timing and easing of the overlay and point-cloud transitions fired on a
/// section change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionConfig {
    pub particle_duration: f64,
    pub particle_step: f32,
    pub particle_easing: Easing,
    pub enter_duration: f64,
    pub enter_delay: f64,
    pub exit_duration: f64,
    pub overlay_offset_px: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            particle_duration: 1.5,
            particle_step: std::f32::consts::FRAC_PI_3,
            particle_easing: Easing::Power2InOut,
            enter_duration: 0.8,
            enter_delay: 0.2,
            exit_duration: 0.4,
            overlay_offset_px: 40.0,
        }
    }
}

/// `#c2252f`, the default tint of both the torus and the particles.
const CRIMSON: [f32; 3] = [0xc2 as f32 / 255.0, 0x25 as f32 / 255.0, 0x2f as f32 / 255.0];

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// World-space spacing between two scroll sections.
    pub object_distance: f32,
    /// Viewports at most this wide use the mobile mesh position.
    pub breakpoint_px: f64,
    pub desktop_mesh_position: Vec2,
    pub mobile_mesh_position: Vec2,
    pub scroll_debounce_secs: f64,
    pub scroll_smoothing: f32,
    pub mesh_smoothing: f32,
    pub parallax_amplitude: f32,
    pub parallax_rate: f32,
    pub rotation_speed: Vec2,
    pub rotation_mode: RotationMode,
    pub section_count: usize,
    pub max_pixel_ratio: f64,
    /// Only track the pointer while it is over the page body itself.
    pub pointer_body_only: bool,
    pub material_color: [f32; 3],
    /// Single tint shared by every particle.
    pub particle_color: [f32; 3],
    pub particle_count: usize,
    pub particle_size: f32,
    pub gradient_path: String,
    pub light_direction: glam::Vec3,
    pub light_intensity: f32,
    pub camera: CameraConfig,
    pub transitions: TransitionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            object_distance: 4.0,
            breakpoint_px: 768.0,
            desktop_mesh_position: Vec2::new(1.0, 0.0),
            mobile_mesh_position: Vec2::ZERO,
            scroll_debounce_secs: 0.1,
            scroll_smoothing: 0.1,
            mesh_smoothing: 0.05,
            parallax_amplitude: 0.8,
            parallax_rate: 2.0,
            rotation_speed: Vec2::new(0.07, -0.1),
            rotation_mode: RotationMode::Accumulate,
            section_count: 3,
            max_pixel_ratio: 2.0,
            pointer_body_only: true,
            material_color: CRIMSON,
            particle_color: CRIMSON,
            particle_count: 4000,
            particle_size: 0.1,
            gradient_path: "textures/gradients/5.jpg".to_string(),
            light_direction: glam::Vec3::new(1.0, 1.0, 0.0),
            light_intensity: 3.0,
            camera: CameraConfig::default(),
            transitions: TransitionConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Override keys understood by [`apply_overrides`](Self::apply_overrides).
    pub const OVERRIDE_KEYS: &'static [&'static str] = &[
        "breakpoint",
        "objectDistance",
        "rotation",
        "particles",
        "materialColor",
        "particlesColor",
        "gradient",
        "pointer",
    ];

    /// Apply string overrides looked up by key. Missing keys keep their
    /// defaults; returns the keys that were applied.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<Vec<&'static str>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();
        for &key in Self::OVERRIDE_KEYS {
            let Some(raw) = lookup(key) else { continue };
            let value = raw.trim();
            let invalid = || ConfigError::InvalidValue {
                key,
                value: value.to_string(),
            };
            match key {
                "breakpoint" => {
                    let px: f64 = value.parse().map_err(|_| invalid())?;
                    if !(px.is_finite() && px >= 0.0) {
                        return Err(invalid());
                    }
                    self.breakpoint_px = px;
                }
                "objectDistance" => {
                    let d: f32 = value.parse().map_err(|_| invalid())?;
                    if !(d.is_finite() && d > 0.0) {
                        return Err(invalid());
                    }
                    self.object_distance = d;
                }
                "rotation" => {
                    self.rotation_mode = RotationMode::from_id(value).ok_or_else(invalid)?;
                }
                "particles" => {
                    self.particle_count = value.parse().map_err(|_| invalid())?;
                }
                "materialColor" => {
                    self.material_color = parse_hex_color(value).ok_or_else(invalid)?
                }
                "particlesColor" => {
                    self.particle_color = parse_hex_color(value).ok_or_else(invalid)?
                }
                "gradient" => {
                    if value.is_empty() {
                        return Err(invalid());
                    }
                    self.gradient_path = value.to_string();
                }
                "pointer" => {
                    self.pointer_body_only = match value {
                        "body" => true,
                        "any" => false,
                        _ => return Err(invalid()),
                    };
                }
                _ => continue,
            }
            applied.push(key);
        }
        Ok(applied)
    }
}

/// Parse `#rrggbb` into linear 0..1 channels.
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
    ])
}
