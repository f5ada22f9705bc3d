//! Animated scroll driver
//!
//! Moves a scroll container's horizontal offset to a target over a duration.
//!
//! The manual path precomputes every frame sample up front (one per
//! [`FRAME_INTERVAL_MS`]) and applies one sample per tick. The first sample
//! is applied synchronously when the scroll starts; the owner schedules the
//! following ticks with a [`FrameClock`](crate::frame::FrameClock) and feeds
//! them back through [`ScrollDriver::tick`].
//!
//! Only one job owns the offset at a time. Starting a scroll issues a fresh
//! [`AnimationToken`] and retires the previous one, so ticks scheduled for a
//! superseded job come back as [`FrameOutcome::Stale`] and touch nothing.

use std::collections::VecDeque;
use std::time::Duration;

use crate::easing::Easing;
use crate::frame::FRAME_INTERVAL_MS;

/// Longest transition the manual path samples. Longer jobs are shortened so
/// the sample queue stays bounded.
pub const MAX_ANIMATION_DURATION: Duration = Duration::from_secs(60);

/// How a native scroll call should move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Something with a horizontal scroll offset.
pub trait ScrollTarget {
    /// Current offset from the content's left edge
    fn scroll_offset(&self) -> f32;

    /// Write the offset. Hosts may clamp to what the content allows.
    fn set_scroll_offset(&mut self, offset: f32);

    /// Whether [`native_scroll_to`](ScrollTarget::native_scroll_to) animates
    /// by itself
    fn supports_native_smooth_scroll(&self) -> bool {
        false
    }

    /// Hand the whole transition to the host.
    fn native_scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        let _ = behavior;
        self.set_scroll_offset(offset);
    }
}

/// Identifies one scroll job
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationToken(u64);

/// A single scroll transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationJob {
    pub target: f32,
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationJob {
    pub fn new(target: f32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            easing: Easing::default(),
        }
    }

    /// Jump straight to `target`
    pub fn instant(target: f32) -> Self {
        Self::new(target, Duration::ZERO)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// How a scroll started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollStart {
    /// Target written synchronously (zero duration or a single frame)
    Completed(AnimationToken),
    /// First frame applied, more ticks needed
    Animating(AnimationToken),
    /// Delegated to the host's native smooth scrolling
    Native(AnimationToken),
}

impl ScrollStart {
    pub fn token(self) -> AnimationToken {
        match self {
            ScrollStart::Completed(token)
            | ScrollStart::Animating(token)
            | ScrollStart::Native(token) => token,
        }
    }

    pub fn is_animating(self) -> bool {
        matches!(self, ScrollStart::Animating(_))
    }
}

/// Result of one animation tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Tick belongs to a job that is no longer active; nothing was written
    Stale,
    /// A sample was applied, schedule another tick
    Continue(AnimationToken),
    /// Final offset written, job finished
    Completed(AnimationToken),
}

struct ActiveScroll {
    token: AnimationToken,
    target: f32,
    samples: VecDeque<f32>,
    ticks: u32,
    duration_ms: f32,
}

/// Drives scroll animations on a [`ScrollTarget`]
pub struct ScrollDriver {
    require_parity: bool,
    next_token: u64,
    active: Option<ActiveScroll>,
}

impl ScrollDriver {
    pub fn new() -> Self {
        Self {
            require_parity: false,
            next_token: 0,
            active: None,
        }
    }

    /// Always use the manual frame path, even when the host could animate
    /// natively, so every environment scrolls identically.
    pub fn with_parity(mut self, require_parity: bool) -> Self {
        self.require_parity = require_parity;
        self
    }

    pub fn requires_parity(&self) -> bool {
        self.require_parity
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_token(&self) -> Option<AnimationToken> {
        self.active.as_ref().map(|active| active.token)
    }

    /// Frames still queued for the active job
    pub fn remaining_frames(&self) -> usize {
        self.active
            .as_ref()
            .map_or(0, |active| active.samples.len())
    }

    /// Stop the active job where it is.
    pub fn cancel(&mut self) -> Option<AnimationToken> {
        let active = self.active.take()?;
        tracing::debug!(token = active.token.0, "scroll animation cancelled");
        Some(active.token)
    }

    /// Start scrolling `target` according to `job`, superseding any job in
    /// flight.
    pub fn scroll_to(&mut self, target: &mut dyn ScrollTarget, job: AnimationJob) -> ScrollStart {
        let token = AnimationToken(self.next_token);
        self.next_token += 1;

        if let Some(previous) = self.active.take() {
            tracing::debug!(
                previous = previous.token.0,
                token = token.0,
                "superseding in-flight scroll animation"
            );
        }

        if job.duration.is_zero() {
            target.set_scroll_offset(job.target);
            return ScrollStart::Completed(token);
        }

        if !self.require_parity && target.supports_native_smooth_scroll() {
            target.native_scroll_to(job.target, ScrollBehavior::Smooth);
            return ScrollStart::Native(token);
        }

        let duration = if job.duration > MAX_ANIMATION_DURATION {
            tracing::warn!(
                requested_ms = job.duration.as_millis() as u64,
                max_ms = MAX_ANIMATION_DURATION.as_millis() as u64,
                "scroll animation too long, shortening"
            );
            MAX_ANIMATION_DURATION
        } else {
            job.duration
        };

        let start = target.scroll_offset();
        let delta = job.target - start;
        let duration_ms = duration.as_secs_f32() * 1000.0;
        let count = (duration_ms / FRAME_INTERVAL_MS).ceil() as usize;
        let samples = (0..count)
            .map(|i| {
                job.easing
                    .interpolate(FRAME_INTERVAL_MS * i as f32, start, delta, duration_ms)
            })
            .collect::<VecDeque<_>>();

        tracing::debug!(
            token = token.0,
            start,
            target = job.target,
            duration_ms,
            frames = samples.len(),
            "scroll animation started"
        );

        self.active = Some(ActiveScroll {
            token,
            target: job.target,
            samples,
            ticks: 0,
            duration_ms,
        });

        match self.step(target) {
            FrameOutcome::Continue(_) => ScrollStart::Animating(token),
            _ => ScrollStart::Completed(token),
        }
    }

    /// Run one animation tick for `token`.
    pub fn tick(&mut self, token: AnimationToken, target: &mut dyn ScrollTarget) -> FrameOutcome {
        if self.active_token() != Some(token) {
            tracing::trace!(token = token.0, "stale animation frame ignored");
            return FrameOutcome::Stale;
        }
        self.step(target)
    }

    fn step(&mut self, target: &mut dyn ScrollTarget) -> FrameOutcome {
        let Some(active) = self.active.as_mut() else {
            return FrameOutcome::Stale;
        };

        active.ticks += 1;
        let elapsed_ms = FRAME_INTERVAL_MS * active.ticks as f32;

        if elapsed_ms < active.duration_ms {
            if let Some(sample) = active.samples.pop_front() {
                target.set_scroll_offset(sample);
                tracing::trace!(token = active.token.0, offset = sample, "scroll frame");
                return FrameOutcome::Continue(active.token);
            }
        }

        // Land exactly on the target; samples never include the endpoint
        target.set_scroll_offset(active.target);
        let token = active.token;
        self.active = None;
        tracing::debug!(token = token.0, "scroll animation completed");
        FrameOutcome::Completed(token)
    }
}

impl Default for ScrollDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        offset: f32,
        writes: Vec<f32>,
        native: bool,
    }

    impl ScrollTarget for Recorder {
        fn scroll_offset(&self) -> f32 {
            self.offset
        }

        fn set_scroll_offset(&mut self, offset: f32) {
            self.offset = offset;
            self.writes.push(offset);
        }

        fn supports_native_smooth_scroll(&self) -> bool {
            self.native
        }
    }

    fn run_to_end(driver: &mut ScrollDriver, token: AnimationToken, target: &mut Recorder) -> usize {
        let mut ticks = 0;
        while let FrameOutcome::Continue(_) = driver.tick(token, target) {
            ticks += 1;
            assert!(ticks < 10_000, "animation never finished");
        }
        ticks
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder::default();

        let start = driver.scroll_to(&mut target, AnimationJob::instant(250.0));

        assert!(matches!(start, ScrollStart::Completed(_)));
        assert_eq!(target.writes, vec![250.0]);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_manual_path_lands_on_target() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder::default();

        let start = driver.scroll_to(
            &mut target,
            AnimationJob::new(300.0, Duration::from_millis(300)),
        );
        assert!(start.is_animating());
        // First sample is applied synchronously and equals the start offset
        assert_eq!(target.writes, vec![0.0]);

        run_to_end(&mut driver, start.token(), &mut target);

        assert_eq!(target.offset, 300.0);
        assert_eq!(*target.writes.last().unwrap(), 300.0);
        assert!(target.writes.len() > 10);
        assert!(target.writes.windows(2).all(|w| w[1] >= w[0]));
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_backwards_scroll_is_monotonic() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder {
            offset: 600.0,
            ..Default::default()
        };

        let start = driver.scroll_to(
            &mut target,
            AnimationJob::new(0.0, Duration::from_millis(200)),
        );
        run_to_end(&mut driver, start.token(), &mut target);

        assert_eq!(target.offset, 0.0);
        assert!(target.writes.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_native_path_when_supported() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder {
            native: true,
            ..Default::default()
        };

        let start = driver.scroll_to(
            &mut target,
            AnimationJob::new(120.0, Duration::from_millis(300)),
        );

        assert!(matches!(start, ScrollStart::Native(_)));
        assert_eq!(target.writes, vec![120.0]);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_parity_forces_manual_path() {
        let mut driver = ScrollDriver::new().with_parity(true);
        assert!(driver.requires_parity());
        let mut target = Recorder {
            native: true,
            ..Default::default()
        };

        let start = driver.scroll_to(
            &mut target,
            AnimationJob::new(120.0, Duration::from_millis(300)),
        );

        assert!(start.is_animating());
    }

    #[test]
    fn test_new_scroll_supersedes_old_token() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder::default();

        let first = driver
            .scroll_to(&mut target, AnimationJob::new(300.0, Duration::from_millis(300)))
            .token();
        driver.tick(first, &mut target);
        driver.tick(first, &mut target);

        let second = driver
            .scroll_to(&mut target, AnimationJob::new(-50.0, Duration::from_millis(300)))
            .token();
        assert_ne!(first, second);

        let writes_before = target.writes.len();
        assert_eq!(driver.tick(first, &mut target), FrameOutcome::Stale);
        assert_eq!(target.writes.len(), writes_before);

        run_to_end(&mut driver, second, &mut target);
        assert_eq!(target.offset, -50.0);
    }

    #[test]
    fn test_cancel_stops_writes() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder::default();

        let token = driver
            .scroll_to(&mut target, AnimationJob::new(300.0, Duration::from_millis(300)))
            .token();
        assert_eq!(driver.cancel(), Some(token));
        assert_eq!(driver.tick(token, &mut target), FrameOutcome::Stale);
        assert_eq!(target.writes, vec![0.0]);
    }

    #[test]
    fn test_huge_duration_is_bounded() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder::default();

        let start = driver.scroll_to(
            &mut target,
            AnimationJob::new(300.0, Duration::from_secs(1_000_000_000)),
        );

        assert!(start.is_animating());
        let max_frames = (60_000.0 / FRAME_INTERVAL_MS).ceil() as usize;
        assert!(driver.remaining_frames() < max_frames);

        let ticks = run_to_end(&mut driver, start.token(), &mut target);
        assert!(ticks <= max_frames);
        assert_eq!(target.offset, 300.0);
    }

    #[test]
    fn test_short_duration_completes_quickly() {
        let mut driver = ScrollDriver::new();
        let mut target = Recorder::default();

        // Shorter than one frame: first tick already reaches the duration
        let start = driver.scroll_to(
            &mut target,
            AnimationJob::new(40.0, Duration::from_millis(10)),
        );

        assert!(matches!(start, ScrollStart::Completed(_)));
        assert_eq!(target.writes, vec![40.0]);
    }
}
