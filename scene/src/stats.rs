//! Frames-per-second sampling.
//!
//! A plain one-second sample count: frames are counted until the window has
//! been open for at least the window length, then the count is published and
//! the window restarts. No smoothing across windows.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use std::time::Duration;

use crate::consts::FPS_WINDOW_MS;

#[derive(Debug, Clone)]
pub struct FrameStats {
    frames_this_window: u32,
    window_start: Duration,
    window: Duration,
    last_fps: u32,
}

impl FrameStats {
    #[must_use]
    pub fn new(now: Duration) -> Self {
        Self::with_window(now, Duration::from_millis(FPS_WINDOW_MS))
    }

    #[must_use]
    pub fn with_window(now: Duration, window: Duration) -> Self {
        Self { frames_this_window: 0, window_start: now, window, last_fps: 0 }
    }

    /// Count one frame at wall time `now`.
    ///
    /// Returns the new sample when this frame closed a window.
    pub fn tick(&mut self, now: Duration) -> Option<u32> {
        self.frames_this_window = self.frames_this_window.saturating_add(1);
        if now.saturating_sub(self.window_start) < self.window {
            return None;
        }
        self.last_fps = self.frames_this_window;
        self.frames_this_window = 0;
        self.window_start = now;
        Some(self.last_fps)
    }

    /// Drop the partial window and start counting again from `now`.
    pub fn restart(&mut self, now: Duration) {
        self.frames_this_window = 0;
        self.window_start = now;
    }

    /// The most recently published sample; 0 until the first window closes.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.last_fps
    }

    #[must_use]
    pub fn frames_this_window(&self) -> u32 {
        self.frames_this_window
    }
}
