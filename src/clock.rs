use std::cell::Cell;

/// Source of elapsed time, in seconds since the scene started.
pub trait Clock {
    fn elapsed(&self) -> f64;
}

/// Clock driven by hand, for tests and offline stepping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now.get()
    }
}
