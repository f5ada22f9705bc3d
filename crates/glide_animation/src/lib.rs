//! Glide Animation System
//!
//! Time-based scroll animation without relying on native smooth scrolling.
//!
//! # Features
//!
//! - **Easing**: quadratic ease-in-out by default, plus a few common curves
//! - **Frame clocks**: display-refresh aligned frames with a timer fallback
//! - **Scroll driver**: precomputed frame samples applied one per tick, with
//!   a single-owner token so a new scroll supersedes an in-flight one

pub mod driver;
pub mod easing;
pub mod frame;

pub use driver::{
    AnimationJob, AnimationToken, FrameOutcome, ScrollBehavior, ScrollDriver, ScrollStart,
    ScrollTarget, MAX_ANIMATION_DURATION,
};
pub use easing::{ease_in_out_quad, Easing};
pub use frame::{
    AnimationFrames, FrameClock, FrameStrategy, HostCapabilities, TimerFrames, FRAME_INTERVAL,
    FRAME_INTERVAL_MS,
};
