//! Frame clocks
//!
//! Decides *when* the next animation frame runs. Hosts that deliver
//! animation-frame callbacks get frames aligned to their refresh grid;
//! everything else falls back to a plain ~60 Hz timer. Callers pick a
//! strategy once, from the host's capabilities, and never branch on it again.

use std::time::Duration;

use glide_core::Timestamp;
use serde::{Deserialize, Serialize};

/// One frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// One frame at 60 Hz, in fractional milliseconds (used for sampling curves).
pub const FRAME_INTERVAL_MS: f32 = 1000.0 / 60.0;

/// What the rendering environment can do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Host delivers callbacks on display refresh
    pub animation_frames: bool,
    /// Display refresh interval when `animation_frames` is set
    pub refresh_interval: Duration,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            animation_frames: false,
            refresh_interval: FRAME_INTERVAL,
        }
    }
}

impl HostCapabilities {
    /// Host with animation-frame callbacks at 60 Hz
    pub fn with_animation_frames() -> Self {
        Self {
            animation_frames: true,
            ..Default::default()
        }
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

/// Source of animation frame deadlines
pub trait FrameClock {
    /// Nominal spacing between frames
    fn interval(&self) -> Duration;

    /// Deadline of the first frame strictly after `now`
    fn next_frame(&self, now: Timestamp) -> Timestamp;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Frames aligned to the display refresh grid (animation-frame callbacks).
#[derive(Clone, Copy, Debug)]
pub struct AnimationFrames {
    refresh: Duration,
}

impl AnimationFrames {
    pub fn new(refresh: Duration) -> Self {
        // A zero interval would spin; treat it as 60 Hz
        let refresh = if refresh.is_zero() {
            FRAME_INTERVAL
        } else {
            refresh
        };
        Self { refresh }
    }
}

impl FrameClock for AnimationFrames {
    fn interval(&self) -> Duration {
        self.refresh
    }

    fn next_frame(&self, now: Timestamp) -> Timestamp {
        let period = self.refresh.as_micros().max(1) as u64;
        let vsync = (now.as_micros() / period + 1) * period;
        Timestamp::from_micros(vsync)
    }

    fn name(&self) -> &'static str {
        "animation-frame"
    }
}

/// Fixed-interval timer frames, used when the host has no frame callbacks.
#[derive(Clone, Copy, Debug)]
pub struct TimerFrames {
    interval: Duration,
}

impl TimerFrames {
    pub fn new(interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            FRAME_INTERVAL
        } else {
            interval
        };
        Self { interval }
    }
}

impl Default for TimerFrames {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl FrameClock for TimerFrames {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn next_frame(&self, now: Timestamp) -> Timestamp {
        now + self.interval
    }

    fn name(&self) -> &'static str {
        "timer"
    }
}

/// Frame scheduling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameStrategy {
    /// Animation frames when the host supports them, timers otherwise
    #[default]
    Auto,
    AnimationFrame,
    Timer,
}

impl FrameStrategy {
    /// Build the frame clock for a host.
    ///
    /// Forcing `AnimationFrame` on a host without frame callbacks falls back
    /// to timers.
    pub fn clock(self, caps: &HostCapabilities) -> Box<dyn FrameClock> {
        let use_frames = match self {
            FrameStrategy::Auto | FrameStrategy::AnimationFrame => caps.animation_frames,
            FrameStrategy::Timer => false,
        };

        if use_frames {
            Box::new(AnimationFrames::new(caps.refresh_interval))
        } else {
            if self == FrameStrategy::AnimationFrame {
                tracing::debug!("host has no animation frames, using timer fallback");
            }
            Box::new(TimerFrames::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_frames_are_relative() {
        let clock = TimerFrames::default();
        assert_eq!(
            clock.next_frame(Timestamp::from_micros(5)),
            Timestamp::from_micros(16_672)
        );
    }

    #[test]
    fn test_animation_frames_align_to_grid() {
        let clock = AnimationFrames::new(Duration::from_millis(10));
        assert_eq!(
            clock.next_frame(Timestamp::from_millis(3)),
            Timestamp::from_millis(10)
        );
        // Exactly on a vsync: the next frame is the following one
        assert_eq!(
            clock.next_frame(Timestamp::from_millis(10)),
            Timestamp::from_millis(20)
        );
    }

    #[test]
    fn test_strategy_selection() {
        let with_frames = HostCapabilities::with_animation_frames();
        let without = HostCapabilities::default();

        assert_eq!(FrameStrategy::Auto.clock(&with_frames).name(), "animation-frame");
        assert_eq!(FrameStrategy::Auto.clock(&without).name(), "timer");
        assert_eq!(FrameStrategy::Timer.clock(&with_frames).name(), "timer");
        assert_eq!(FrameStrategy::AnimationFrame.clock(&without).name(), "timer");
    }

    #[test]
    fn test_zero_interval_falls_back_to_60hz() {
        assert_eq!(TimerFrames::new(Duration::ZERO).interval(), FRAME_INTERVAL);
        assert_eq!(AnimationFrames::new(Duration::ZERO).interval(), FRAME_INTERVAL);
    }
}
