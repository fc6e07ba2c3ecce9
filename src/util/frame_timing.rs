//! Frame clock with smoothed FPS.

use web_time::{Duration, Instant};

/// Millisecond frame clock with an exponentially smoothed FPS estimate.
pub struct FrameTiming {
    /// When the clock started; timestamps are measured from here.
    origin: Instant,
    /// Last frame timestamp.
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Last time [`take_report`](Self::take_report) returned `Some`.
    last_report: Instant,
    report_interval: Duration,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl FrameTiming {
    /// Start the clock now; FPS reports are offered every `report_interval`.
    #[must_use]
    pub fn new(report_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
            last_report: now,
            report_interval,
        }
    }

    /// Record a frame and return its timestamp in milliseconds since the
    /// clock started.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Calculate instantaneous FPS
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        now.duration_since(self.origin).as_secs_f64() * 1000.0
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// The smoothed FPS, at most once per report interval.
    pub fn take_report(&mut self) -> Option<f32> {
        if self.last_frame.duration_since(self.last_report) < self.report_interval {
            return None;
        }
        self.last_report = self.last_frame;
        Some(self.smoothed_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let mut timing = FrameTiming::default();
        let a = timing.tick();
        let b = timing.tick();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn report_is_rate_limited() {
        let mut timing = FrameTiming::new(Duration::ZERO);
        let _ = timing.tick();
        assert!(timing.take_report().is_some());

        let mut slow = FrameTiming::new(Duration::from_secs(3600));
        let _ = slow.tick();
        assert!(slow.take_report().is_none());
    }
}
