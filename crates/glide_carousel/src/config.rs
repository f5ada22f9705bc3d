//! Carousel configuration
//!
//! Loaded from TOML or built in code with the setter methods:
//!
//! ```toml
//! variant = "menu"
//! scroll_interval_ms = 450
//! easing = "ease-in-out-cubic"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use glide_animation::{Easing, FrameStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Upper bound for every configurable duration
const MAX_DURATION_MS: u64 = 10_000;

/// How the total content width is measured
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Trust the container's native scroll width (items may vary in width)
    Menu,
    /// `item_count × first item width`
    #[default]
    Carousel,
}

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Delay between a navigation click and the start of the animation
    pub scroll_delay_ms: u64,
    /// Quiet period before a resize burst triggers a recompute
    pub scroll_debounce_ms: u64,
    /// Duration of the navigation animation
    pub scroll_interval_ms: u64,
    /// Width measurement variant
    pub variant: Variant,
    /// Hide both buttons and ignore navigation
    pub disabled: bool,
    /// Presentation hint: vertically center the arrows
    pub center_arrows: bool,
    /// Navigation animation curve
    pub easing: Easing,
    /// Frame scheduling strategy for the manual animation path
    pub frame_strategy: FrameStrategy,
    /// Never use native smooth scrolling, so all hosts animate identically
    pub require_parity: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 10,
            scroll_debounce_ms: 100,
            scroll_interval_ms: 300,
            variant: Variant::Carousel,
            disabled: false,
            center_arrows: false,
            easing: Easing::EaseInOutQuad,
            frame_strategy: FrameStrategy::Auto,
            require_parity: false,
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu-variant config
    pub fn menu() -> Self {
        Self {
            variant: Variant::Menu,
            ..Default::default()
        }
    }

    /// Set the pre-scroll delay
    pub fn scroll_delay(mut self, ms: u64) -> Self {
        self.scroll_delay_ms = ms;
        self
    }

    /// Set the resize debounce quiet period
    pub fn scroll_debounce(mut self, ms: u64) -> Self {
        self.scroll_debounce_ms = ms;
        self
    }

    /// Set the navigation animation duration
    pub fn scroll_interval(mut self, ms: u64) -> Self {
        self.scroll_interval_ms = ms;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn center_arrows(mut self, center: bool) -> Self {
        self.center_arrows = center;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn frame_strategy(mut self, strategy: FrameStrategy) -> Self {
        self.frame_strategy = strategy;
        self
    }

    pub fn require_parity(mut self, require: bool) -> Self {
        self.require_parity = require;
        self
    }

    pub fn scroll_delay_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn scroll_debounce_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn scroll_interval_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }

    /// Reject durations nobody would configure on purpose
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("scroll_delay_ms", self.scroll_delay_ms),
            ("scroll_debounce_ms", self.scroll_debounce_ms),
            ("scroll_interval_ms", self.scroll_interval_ms),
        ] {
            if value > MAX_DURATION_MS {
                return Err(ConfigError::Invalid(format!(
                    "{name} = {value} exceeds {MAX_DURATION_MS} ms"
                )));
            }
        }
        Ok(())
    }

    /// Pull durations above the allowed maximum back down to it.
    pub fn clamped(mut self) -> Self {
        for (name, value) in [
            ("scroll_delay_ms", &mut self.scroll_delay_ms),
            ("scroll_debounce_ms", &mut self.scroll_debounce_ms),
            ("scroll_interval_ms", &mut self.scroll_interval_ms),
        ] {
            if *value > MAX_DURATION_MS {
                tracing::warn!(
                    name,
                    value = *value,
                    max = MAX_DURATION_MS,
                    "carousel duration out of range, clamping"
                );
                *value = MAX_DURATION_MS;
            }
        }
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CarouselConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
