//! Frame statistics tracking

use std::collections::VecDeque;
use std::time::Duration;

/// Rolling frame-time tracker for FPS display and profiling
#[derive(Debug)]
pub struct FrameStats {
    /// Recent frame times, oldest first
    frame_times: VecDeque<Duration>,
    /// Maximum samples kept in the window
    max_samples: usize,
    /// Total frames recorded since creation
    total_frames: u64,
}

impl FrameStats {
    /// Default sample window, roughly two seconds at 60 FPS
    const DEFAULT_SAMPLES: usize = 120;

    /// Create a new tracker with the default sample window
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(Self::DEFAULT_SAMPLES),
            max_samples: Self::DEFAULT_SAMPLES,
            total_frames: 0,
        }
    }

    /// Record one frame's delta time
    pub fn record_frame(&mut self, delta: Duration) {
        self.total_frames += 1;
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta);
    }

    /// Frames per second averaged over the sample window
    pub fn fps(&self) -> f32 {
        let avg = self.average_frame_time();
        if avg.is_zero() {
            0.0
        } else {
            1.0 / avg.as_secs_f32()
        }
    }

    /// Average frame time over the sample window
    pub fn average_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.frame_times.iter().sum();
        total / self.frame_times.len() as u32
    }

    /// Longest frame time in the sample window
    pub fn worst_frame_time(&self) -> Duration {
        self.frame_times.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Total frames recorded since creation
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_frames_and_reports_fps() {
        let mut stats = FrameStats::new();
        for _ in 0..10 {
            stats.record_frame(Duration::from_millis(16));
        }
        assert_eq!(stats.total_frames(), 10);
        let fps = stats.fps();
        assert!(fps > 55.0 && fps < 70.0, "unexpected fps {fps}");
    }

    #[test]
    fn window_is_bounded() {
        let mut stats = FrameStats::new();
        for _ in 0..1000 {
            stats.record_frame(Duration::from_millis(1));
        }
        assert_eq!(stats.total_frames(), 1000);
        assert!(stats.average_frame_time() <= Duration::from_millis(1));
    }

    #[test]
    fn empty_tracker_is_quiet() {
        let stats = FrameStats::new();
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.worst_frame_time(), Duration::ZERO);
    }
}
