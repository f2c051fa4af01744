//! Frame clock built on a monotonic instant

use std::time::{Duration, Instant};

/// Tracks elapsed time and the delta between frames
#[derive(Debug, Clone)]
pub struct Time {
    /// When the clock was created
    start: Instant,
    /// When `update` was last called
    last: Instant,
    /// Time between the two most recent updates
    delta: Duration,
}

impl Time {
    /// Create a new clock with a zero delta
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            delta: Duration::ZERO,
        }
    }

    /// Advance the clock; call once at the start of every frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last;
        self.last = now;
    }

    /// Time between the two most recent updates
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta time in seconds, convenient for simulation steps
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clock_has_zero_delta() {
        let time = Time::new();
        assert_eq!(time.delta(), Duration::ZERO);
        assert_eq!(time.delta_seconds(), 0.0);
    }

    #[test]
    fn update_produces_monotonic_delta() {
        let mut time = Time::new();
        std::thread::sleep(Duration::from_millis(2));
        time.update();
        assert!(time.delta() > Duration::ZERO);
        assert!(time.elapsed() >= time.delta());
    }
}
