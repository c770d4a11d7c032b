//! Property tweens for the section transitions.
//!
//! The loop only needs "animate this property to that value over a duration
//! with an easing, and let a newer request take over mid-flight". That is the
//! [`PropertyTweener`] trait; [`TweenSet`] is the implementation the page
//! uses. Tweens are sampled against the clock, so they progress on their own
//! schedule regardless of how often frames are drawn.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power1Out,
    Power2In,
    Power2Out,
    #[default]
    Power2InOut,
    Power3Out,
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress.
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Timing of one tween request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
}

impl TweenSpec {
    pub fn new(duration: f64, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0.0,
            easing,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: f64,
    pub spec: TweenSpec,
}

impl Tween {
    pub fn sample(&self, now: f64) -> f32 {
        let begin = self.start + self.spec.delay;
        if now <= begin {
            return self.from;
        }
        if self.spec.duration <= 0.0 || now >= begin + self.spec.duration {
            return self.to;
        }
        let t = ((now - begin) / self.spec.duration) as f32;
        self.from + (self.to - self.from) * self.spec.easing.ease(t)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start + self.spec.delay + self.spec.duration
    }
}

/// The animatable properties of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    OverlayOpacity(usize),
    /// Vertical offset of an overlay, in CSS pixels.
    OverlayOffset(usize),
    /// Rotation of the point cloud around the vertical axis.
    ParticleRotation,
}

pub trait PropertyTweener {
    /// Animate `target` from its current value to `to`. An in-flight tween on
    /// the same property is replaced.
    fn animate(&mut self, target: TweenTarget, to: f32, spec: TweenSpec, now: f64);

    /// Stop any tween on `target`, leaving the property where it is now.
    fn cancel(&mut self, target: TweenTarget, now: f64);

    /// Jump to `value` with no animation.
    fn set(&mut self, target: TweenTarget, value: f32);

    fn value(&self, target: TweenTarget, now: f64) -> f32;

    fn is_animating(&self, target: TweenTarget, now: f64) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Property {
    Resting(f32),
    Animating(Tween),
}

impl Property {
    fn value(&self, now: f64) -> f32 {
        match self {
            Property::Resting(v) => *v,
            Property::Animating(tween) => tween.sample(now),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    properties: HashMap<TweenTarget, Property>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop finished tweens, keeping their end values.
    pub fn settle(&mut self, now: f64) {
        for prop in self.properties.values_mut() {
            if let Property::Animating(tween) = prop {
                if tween.is_finished(now) {
                    *prop = Property::Resting(tween.to);
                }
            }
        }
    }

    pub fn active_count(&self, now: f64) -> usize {
        self.properties
            .values()
            .filter(|p| matches!(p, Property::Animating(t) if !t.is_finished(now)))
            .count()
    }
}

impl PropertyTweener for TweenSet {
    fn animate(&mut self, target: TweenTarget, to: f32, spec: TweenSpec, now: f64) {
        let from = self.value(target, now);
        self.properties.insert(
            target,
            Property::Animating(Tween {
                from,
                to,
                start: now,
                spec,
            }),
        );
    }

    fn cancel(&mut self, target: TweenTarget, now: f64) {
        if let Some(prop) = self.properties.get_mut(&target) {
            *prop = Property::Resting(prop.value(now));
        }
    }

    fn set(&mut self, target: TweenTarget, value: f32) {
        self.properties.insert(target, Property::Resting(value));
    }

    fn value(&self, target: TweenTarget, now: f64) -> f32 {
        self.properties
            .get(&target)
            .map(|p| p.value(now))
            .unwrap_or(0.0)
    }

    fn is_animating(&self, target: TweenTarget, now: f64) -> bool {
        matches!(
            self.properties.get(&target),
            Some(Property::Animating(t)) if !t.is_finished(now)
        )
    }
}
