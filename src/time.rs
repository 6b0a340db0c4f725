//! Frame timing driven by host timestamps.
//!
//! The host (a display-refresh callback, a game loop, a test) hands the clock
//! a monotonic timestamp once per frame; the clock turns it into the delta
//! the simulation should advance by.
//!
//! # Example
//!
//! ```
//! use flakefall::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.start(0.0);
//!
//! // In the refresh callback:
//! if let Some(dt) = clock.tick(1.0 / 60.0) {
//!     assert!((dt - 1.0 / 60.0).abs() < 1e-6);
//! }
//! ```

/// Turns per-frame timestamps into frame deltas.
///
/// Starting the clock resets the baseline to the start timestamp, so the
/// first delta after a pause is one frame, not the whole pause. A stopped
/// clock yields no deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous tick (seconds).
    last: Option<f64>,
    running: bool,
    /// Seconds of simulated time since the clock was created.
    elapsed_secs: f64,
    /// Delta returned by the last tick.
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: f64,
    /// How often to update the FPS estimate, in seconds.
    fps_update_interval: f64,
    /// Upper bound on a single delta (optional).
    max_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl FrameClock {
    /// A stopped clock.
    pub fn new() -> Self {
        Self {
            last: None,
            running: false,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: 0.0,
            fps_update_interval: 0.5,
            max_delta: None,
            time_scale: 1.0,
        }
    }

    /// Start (or restart) the clock with `now` as the baseline.
    pub fn start(&mut self, now: f64) {
        self.last = Some(now);
        self.fps_window_start = now;
        self.fps_frame_count = self.frame_count;
        if !self.running {
            log::debug!("frame clock started at {:.3}s", now);
        }
        self.running = true;
    }

    /// Stop producing deltas until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("frame clock stopped after {} frames", self.frame_count);
        }
        self.running = false;
        self.delta_secs = 0.0;
    }

    /// Start if stopped, stop if running.
    pub fn toggle(&mut self, now: f64) {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Feed the current timestamp. Returns the scaled delta since the
    /// previous tick, or `None` while stopped.
    ///
    /// A timestamp earlier than the previous one yields a zero delta.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        if !self.running {
            return None;
        }

        let last = self.last.unwrap_or(now);
        self.last = Some(now);

        let raw = ((now - last).max(0.0) as f32) * self.time_scale;
        let delta = match self.max_delta {
            Some(max) => raw.min(max),
            None => raw,
        };

        self.delta_secs = delta;
        self.elapsed_secs += delta as f64;
        self.frame_count += 1;

        let window = now - self.fps_window_start;
        if window >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = (frames as f64 / window) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = now;
        }

        Some(delta)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Simulated seconds accumulated over all ticks.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    /// Delta produced by the most recent tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, measured over host time.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Clamp every delta to at most `max` seconds. `None` disables clamping.
    pub fn set_max_delta(&mut self, max: Option<f32>) {
        self.max_delta = max;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
