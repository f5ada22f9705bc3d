//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInOutCubic,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Value at `elapsed` of a transition from `start` by `delta` lasting
    /// `duration` (any time unit, as long as both agree).
    pub fn interpolate(&self, elapsed: f32, start: f32, delta: f32, duration: f32) -> f32 {
        if duration <= 0.0 {
            return start + delta;
        }
        start + delta * self.apply(elapsed / duration)
    }
}

/// Quadratic ease-in-out in the classic `(t, b, c, d)` form: accelerate
/// through the first half of `duration`, decelerate through the second.
///
/// Returns `start` at `elapsed = 0` and `start + delta` at
/// `elapsed = duration`.
pub fn ease_in_out_quad(elapsed: f32, start: f32, delta: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return start + delta;
    }
    let mut t = elapsed / (duration / 2.0);
    if t < 1.0 {
        return delta / 2.0 * t * t + start;
    }
    t -= 1.0;
    -delta / 2.0 * (t * (t - 2.0) - 1.0) + start
}
