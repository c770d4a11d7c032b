//! Cheap low-pass filters used to ease visual state toward its targets.
//!
//! Two schemes coexist: [`lerp`] moves a fixed fraction per frame (so it runs
//! faster at higher refresh rates) and [`damp`] scales the step by the frame
//! delta.

use glam::Vec2;

/// Below this distance a smoothed value is snapped onto its target.
pub const SNAP_EPSILON: f32 = 1e-4;

/// Move `current` a fixed `factor` of the way toward `target`. Snaps once the
/// remaining distance is negligible or the step is lost to float precision.
pub fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    let next = current + (target - current) * factor.clamp(0.0, 1.0);
    if (target - next).abs() < SNAP_EPSILON || (next == current && factor > 0.0) {
        target
    } else {
        next
    }
}

pub fn lerp_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    Vec2::new(
        lerp(current.x, target.x, factor),
        lerp(current.y, target.y, factor),
    )
}

/// Delta-time scaled smoothing: `current + (target - current) * rate * dt`.
/// The step never passes the target, however long the frame.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let step = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * step
}

pub fn damp_vec2(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    Vec2::new(
        damp(current.x, target.x, rate, dt),
        damp(current.y, target.y, rate, dt),
    )
}
