//! Frame clock.
//!
//! Animation steps are batched onto frame boundaries so that measurements
//! and style writes land in separate frames. The clock only decides how long
//! "one frame" is; it does not drive rendering itself.

use std::time::Duration;

/// Default frames per second.
pub const DEFAULT_FPS: u16 = 60;

/// Yields on paint-frame boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    frame_duration: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_fps(DEFAULT_FPS)
    }
}

impl FrameClock {
    /// Create a clock with an explicit frame duration.
    pub fn new(frame_duration: Duration) -> Self {
        Self { frame_duration }
    }

    /// Create a clock running at `fps` frames per second (minimum 1).
    pub fn from_fps(fps: u16) -> Self {
        Self::new(Duration::from_secs(1) / u32::from(fps.max(1)))
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Wait until the next frame.
    pub async fn next_frame(&self) {
        tokio::time::sleep(self.frame_duration).await;
    }
}
