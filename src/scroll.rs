use crate::smoothing::lerp;

/// A re-armable "settled" signal. Each [`arm`](Debounce::arm) cancels the
/// previous deadline, so at most one settle is ever pending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debounce {
    window: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(window: f64) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: f64) {
        self.deadline = Some(now + self.window);
    }

    /// True for the whole window following the last `arm`.
    pub fn is_active(&self, now: f64) -> bool {
        matches!(self.deadline, Some(deadline) if now < deadline)
    }

    pub fn pending_deadline(&self) -> Option<f64> {
        self.deadline
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub target_y: f32,
    pub current_y: f32,
    debounce: Debounce,
}

impl ScrollState {
    /// Starts settled at `y`: current and target agree.
    pub fn new(y: f32, debounce_window: f64) -> Self {
        Self {
            target_y: y,
            current_y: y,
            debounce: Debounce::new(debounce_window),
        }
    }

    pub fn on_scroll(&mut self, y: f32, now: f64) {
        self.target_y = y;
        self.debounce.arm(now);
    }

    pub fn smooth(&mut self, factor: f32) -> f32 {
        self.current_y = lerp(self.current_y, self.target_y, factor);
        self.current_y
    }

    pub fn is_scrolling(&self, now: f64) -> bool {
        self.debounce.is_active(now)
    }
}

/// Index of the section nearest to `scroll_y`, one section per viewport
/// height.
pub fn section_index(scroll_y: f32, viewport_height: f64, section_count: usize) -> usize {
    if viewport_height <= 0.0 || section_count == 0 {
        return 0;
    }
    let raw = (scroll_y as f64 / viewport_height).round();
    if raw <= 0.0 {
        return 0;
    }
    (raw as usize).min(section_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_covers_full_window() {
        let mut d = Debounce::new(0.1);
        assert!(!d.is_active(0.0));
        d.arm(1.0);
        assert!(d.is_active(1.0));
        assert!(d.is_active(1.099));
        assert!(!d.is_active(1.1));
    }

    #[test]
    fn rearming_extends_window() {
        let mut d = Debounce::new(0.1);
        d.arm(1.0);
        d.arm(1.08);
        assert!(d.is_active(1.15));
        assert!(!d.is_active(1.19));
        assert_eq!(d.pending_deadline(), Some(1.08 + 0.1));
    }

    #[test]
    fn scroll_target_is_immediate_current_is_smoothed() {
        let mut s = ScrollState::new(0.0, 0.1);
        s.on_scroll(1000.0, 0.0);
        assert_eq!(s.target_y, 1000.0);
        assert_eq!(s.current_y, 0.0);
        let y = s.smooth(0.1);
        assert!((y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn section_rounding() {
        assert_eq!(section_index(0.0, 800.0, 3), 0);
        assert_eq!(section_index(50.0, 800.0, 3), 0);
        assert_eq!(section_index(399.0, 800.0, 3), 0);
        assert_eq!(section_index(400.0, 800.0, 3), 1);
        assert_eq!(section_index(900.0, 800.0, 3), 1);
        assert_eq!(section_index(1700.0, 800.0, 3), 2);
    }

    #[test]
    fn section_clamps_overscroll() {
        assert_eq!(section_index(-120.0, 800.0, 3), 0);
        assert_eq!(section_index(99_999.0, 800.0, 3), 2);
        assert_eq!(section_index(500.0, 0.0, 3), 0);
    }
}
