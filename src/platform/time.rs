//! Frame timing
//!
//! `FrameClock` sleeps out the remainder of each frame and reports how long
//! the previous frame really took, clamped so a stall (terminal resize,
//! suspended process) never turns into one giant simulation step.

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_MS;

/// Clamp a measured frame to `1..=MAX_FRAME_MS` milliseconds
pub fn clamp_frame_ms(elapsed: Duration) -> u32 {
    let ms = elapsed.as_millis().min(u128::from(MAX_FRAME_MS));
    (ms as u32).max(1)
}

/// Target frame length for a frame rate (0 is treated as 1 fps)
pub fn frame_budget(target_fps: u32) -> Duration {
    Duration::from_secs(1) / target_fps.max(1)
}

#[derive(Debug)]
pub struct FrameClock {
    budget: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget: frame_budget(target_fps),
            last: Instant::now(),
        }
    }

    /// Milliseconds since the previous call (or construction), clamped
    pub fn delta_ms(&mut self) -> u32 {
        let now = Instant::now();
        let dt = clamp_frame_ms(now.duration_since(self.last));
        self.last = now;
        dt
    }

    /// Sleep until this frame's budget is used up
    pub fn wait(&self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.budget {
            std::thread::sleep(self.budget - elapsed);
        }
    }
}
