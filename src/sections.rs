//! Which text overlay is showing, and the transitions between them.

use crate::config::TransitionConfig;
use crate::scroll::section_index;
use crate::tween::{Easing, PropertyTweener, TweenSpec, TweenTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionChange {
    pub from: usize,
    pub to: usize,
}

/// Visual state of one overlay for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayStyle {
    pub opacity: f32,
    pub offset_px: f32,
}

#[derive(Clone, Debug)]
pub struct SectionTracker {
    current: usize,
    count: usize,
    transitions: TransitionConfig,
}

impl SectionTracker {
    pub fn new(count: usize, transitions: TransitionConfig) -> Self {
        Self {
            current: 0,
            count,
            transitions,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Show `index` immediately with everything else hidden.
    pub fn reset<T: PropertyTweener>(&mut self, index: usize, tweener: &mut T) {
        self.current = index.min(self.count.saturating_sub(1));
        for i in 0..self.count {
            let visible = i == self.current;
            tweener.set(TweenTarget::OverlayOpacity(i), if visible { 1.0 } else { 0.0 });
            tweener.set(TweenTarget::OverlayOffset(i), 0.0);
        }
        tweener.set(
            TweenTarget::ParticleRotation,
            self.particle_rotation_for(self.current),
        );
    }

    /// Recompute the section for a new scroll target. Fires the exit, point
    /// cloud and enter animations, in that order, only when the index moved.
    pub fn update<T: PropertyTweener>(
        &mut self,
        scroll_y: f32,
        viewport_height: f64,
        tweener: &mut T,
        now: f64,
    ) -> Option<SectionChange> {
        let next = section_index(scroll_y, viewport_height, self.count);
        if next == self.current {
            return None;
        }
        let change = SectionChange {
            from: self.current,
            to: next,
        };
        let tr = self.transitions;
        let exit = TweenSpec::new(tr.exit_duration, Easing::Power2In);
        // Scrolling down pushes the old text up, scrolling up pushes it down.
        let direction = if next > self.current { -1.0 } else { 1.0 };

        tweener.animate(TweenTarget::OverlayOpacity(change.from), 0.0, exit, now);
        tweener.animate(
            TweenTarget::OverlayOffset(change.from),
            direction * tr.overlay_offset_px,
            exit,
            now,
        );

        tweener.animate(
            TweenTarget::ParticleRotation,
            self.particle_rotation_for(next),
            TweenSpec::new(tr.particle_duration, tr.particle_easing),
            now,
        );

        // A hidden overlay starts from the opposite side and slides in. One
        // still fading out is turned around from where it is.
        let opacity = TweenTarget::OverlayOpacity(next);
        if !tweener.is_animating(opacity, now) && tweener.value(opacity, now) == 0.0 {
            tweener.set(
                TweenTarget::OverlayOffset(next),
                -direction * tr.overlay_offset_px,
            );
        }
        let enter = TweenSpec::new(tr.enter_duration, Easing::Power2Out).delayed(tr.enter_delay);
        tweener.animate(TweenTarget::OverlayOpacity(next), 1.0, enter, now);
        tweener.animate(TweenTarget::OverlayOffset(next), 0.0, enter, now);

        self.current = next;
        Some(change)
    }

    pub fn overlay_styles<T: PropertyTweener>(&self, tweener: &T, now: f64) -> Vec<OverlayStyle> {
        (0..self.count)
            .map(|i| OverlayStyle {
                opacity: tweener.value(TweenTarget::OverlayOpacity(i), now),
                offset_px: tweener.value(TweenTarget::OverlayOffset(i), now),
            })
            .collect()
    }

    fn particle_rotation_for(&self, index: usize) -> f32 {
        index as f32 * self.transitions.particle_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::TweenSet;

    fn tracker() -> (SectionTracker, TweenSet) {
        let mut tweens = TweenSet::new();
        let mut t = SectionTracker::new(3, TransitionConfig::default());
        t.reset(0, &mut tweens);
        (t, tweens)
    }

    #[test]
    fn reset_shows_only_one_overlay() {
        let (t, tweens) = tracker();
        let styles = t.overlay_styles(&tweens, 0.0);
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[0].opacity, 1.0);
        assert_eq!(styles[1].opacity, 0.0);
        assert_eq!(styles[2].opacity, 0.0);
    }

    #[test]
    fn small_scroll_keeps_section() {
        let (mut t, mut tweens) = tracker();
        assert_eq!(t.update(50.0, 800.0, &mut tweens, 0.0), None);
        assert_eq!(tweens.active_count(0.0), 0);
    }

    #[test]
    fn crossing_fires_once() {
        let (mut t, mut tweens) = tracker();
        let change = t.update(900.0, 800.0, &mut tweens, 0.0);
        assert_eq!(change, Some(SectionChange { from: 0, to: 1 }));
        assert_eq!(t.update(950.0, 800.0, &mut tweens, 0.1), None);
        assert_eq!(t.current(), 1);
    }

    #[test]
    fn transition_ends_with_new_overlay_visible() {
        let (mut t, mut tweens) = tracker();
        t.update(1600.0, 800.0, &mut tweens, 0.0);
        let styles = t.overlay_styles(&tweens, 5.0);
        assert_eq!(styles[0].opacity, 0.0);
        assert_eq!(styles[2].opacity, 1.0);
        assert_eq!(styles[2].offset_px, 0.0);
        let rot = tweens.value(TweenTarget::ParticleRotation, 5.0);
        assert!((rot - 2.0 * std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn entering_overlay_waits_for_delay() {
        let (mut t, mut tweens) = tracker();
        t.update(800.0, 800.0, &mut tweens, 0.0);
        let styles = t.overlay_styles(&tweens, 0.1);
        assert_eq!(styles[1].opacity, 0.0);
        assert_eq!(styles[1].offset_px, 40.0);
    }

    #[test]
    fn reversal_mid_exit_fades_back_from_current_opacity() {
        let (mut t, mut tweens) = tracker();
        t.update(900.0, 800.0, &mut tweens, 0.0);
        let leaving = t.overlay_styles(&tweens, 0.1)[0];
        assert!(leaving.opacity > 0.9 && leaving.opacity < 1.0);

        assert_eq!(
            t.update(100.0, 800.0, &mut tweens, 0.1),
            Some(SectionChange { from: 1, to: 0 })
        );
        let back = t.overlay_styles(&tweens, 0.1)[0];
        assert_eq!(back, leaving);
        // Holds through the enter delay, then climbs back to fully visible.
        assert_eq!(t.overlay_styles(&tweens, 0.25)[0], leaving);
        for step in 1..=10 {
            let now = 0.3 + step as f64 * 0.08;
            assert!(t.overlay_styles(&tweens, now)[0].opacity >= leaving.opacity);
        }
        let settled = t.overlay_styles(&tweens, 2.0)[0];
        assert_eq!(settled.opacity, 1.0);
        assert_eq!(settled.offset_px, 0.0);
    }
}
