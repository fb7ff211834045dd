/// Frame timer: frame delta and a frames-per-second counter

use crate::engine_info;

/// Counts frames and reports FPS each time the clock crosses a whole second
///
/// Driven by the same millisecond tick the renderer receives.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    previous_ms: Option<u64>,
    frames: u32,
    fps: Option<u32>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms`, returning seconds since the previous frame
    ///
    /// When `now_ms` enters a new second, the frames counted so far are
    /// logged at INFO and become `fps()`.
    pub fn tick(&mut self, now_ms: u64) -> f32 {
        let Some(previous) = self.previous_ms.replace(now_ms) else {
            self.frames = 1;
            return 0.0;
        };

        // Clocks going backwards count as a zero-length frame
        let delta = now_ms.saturating_sub(previous);
        if now_ms / 1000 > previous / 1000 {
            engine_info!("prism3d::FrameTimer", "FPS: {}", self.frames);
            self.fps = Some(self.frames);
            self.frames = 0;
        }
        self.frames += 1;
        delta as f32 / 1000.0
    }

    /// Frames counted during the last completed second
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    /// Frames counted since the last report
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
#[path = "frame_timer_tests.rs"]
mod tests;
