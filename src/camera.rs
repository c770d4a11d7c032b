//! The camera rig: a parent group moved by the pointer, holding a camera that
//! is pushed along the view axis and moved vertically by the scroll.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Parallax offset of the group.
    pub group: Vec2,
    /// Camera position inside the group.
    pub local: Vec3,
    pub config: CameraConfig,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            group: Vec2::ZERO,
            local: Vec3::new(0.0, 0.0, config.distance),
            config,
        }
    }

    pub fn world_position(&self) -> Vec3 {
        self.local + self.group.extend(0.0)
    }

    /// The camera never rotates, so the view is a pure translation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.world_position())
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_degrees.to_radians(),
            aspect.max(f32::EPSILON),
            self.config.near,
            self.config.far,
        )
    }
}
