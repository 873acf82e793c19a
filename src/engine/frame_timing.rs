use web_time::{Duration, Instant};

/// How often the smoothed frame rate is logged.
const LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Frame timing with smoothed FPS and periodic debug logging.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// When the FPS was last logged
    last_log: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames since the engine started
    frame_count: u64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_log: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frame_count: 0,
        }
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.record(now.duration_since(self.last_frame));
        self.last_frame = now;

        if now.duration_since(self.last_log) >= LOG_INTERVAL {
            self.last_log = now;
            log::debug!(
                "{:.1} fps ({} frames)",
                self.smoothed_fps,
                self.frame_count
            );
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.frame_count += 1;
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_moves_toward_instant_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..200 {
            timing.record(Duration::from_millis(10));
        }
        assert!((timing.fps() - 100.0).abs() < 1.0, "{}", timing.fps());
        assert_eq!(timing.frame_count(), 200);
    }

    #[test]
    fn zero_length_frames_keep_previous_rate() {
        let mut timing = FrameTiming::new();
        timing.record(Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
        assert_eq!(timing.frame_count(), 1);
    }
}
