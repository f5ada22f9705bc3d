//! Scenario files
//!
//! A scenario describes a headless host, a carousel configuration and a list
//! of timed steps:
//!
//! ```toml
//! [host]
//! viewport_width = 300
//! items = 5
//! item_width = 100
//!
//! [carousel]
//! scroll_interval_ms = 300
//!
//! [[step]]
//! at_ms = 0
//! action = "mount"
//!
//! [[step]]
//! at_ms = 100
//! action = "navigate"
//! direction = "right"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glide_animation::HostCapabilities;
use glide_carousel::{CarouselConfig, HeadlessContainer};
use glide_core::Direction;
use serde::{Deserialize, Serialize};

/// Scenario written by `glide init`
pub const EXAMPLE_SCENARIO: &str = r#"# Glide carousel scenario
#
# Replay with: glide simulate <this file> --frames

[host]
viewport_width = 300
items = 5
item_width = 100
native_smooth_scroll = false
animation_frames = false

[carousel]
variant = "carousel"
scroll_delay_ms = 10
scroll_debounce_ms = 100
scroll_interval_ms = 300
easing = "ease-in-out-quad"

[[step]]
at_ms = 0
action = "mount"

[[step]]
at_ms = 100
action = "navigate"
direction = "right"

[[step]]
at_ms = 600
action = "resize"
width = 250

[[step]]
at_ms = 650
action = "resize"
width = 200

[[step]]
at_ms = 1000
action = "navigate"
direction = "left"

[[step]]
at_ms = 1500
action = "items"
count = 8

[[step]]
at_ms = 1510
action = "settle"
"#;

/// Headless host geometry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSpec {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Number of equal-width items, ignored when `item_widths` is set
    pub items: usize,
    pub item_width: f32,
    /// Individual item widths
    pub item_widths: Option<Vec<f32>>,
    pub native_smooth_scroll: bool,
    pub animation_frames: bool,
}

impl Default for HostSpec {
    fn default() -> Self {
        Self {
            viewport_width: 300.0,
            viewport_height: 0.0,
            items: 5,
            item_width: 100.0,
            item_widths: None,
            native_smooth_scroll: false,
            animation_frames: false,
        }
    }
}

impl HostSpec {
    pub fn container(&self) -> HeadlessContainer {
        let container = HeadlessContainer::new(self.viewport_width)
            .with_viewport_height(self.viewport_height)
            .with_native_smooth_scroll(self.native_smooth_scroll);

        match &self.item_widths {
            Some(widths) => container.with_item_widths(widths.iter().copied()),
            None => container.with_items(self.items, self.item_width),
        }
    }

    pub fn capabilities(&self) -> HostCapabilities {
        if self.animation_frames {
            HostCapabilities::with_animation_frames()
        } else {
            HostCapabilities::default()
        }
    }
}

/// What happens at a step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Mount,
    Unmount,
    /// Click a navigation button
    Navigate { direction: Direction },
    /// Resize the viewport and notify listeners
    Resize {
        width: f32,
        #[serde(default)]
        height: f32,
    },
    /// Re-render with `count` items
    Items {
        count: usize,
        #[serde(default)]
        width: Option<f32>,
    },
    /// Host finished rendering
    Settle,
    /// User scrolled to `offset`
    Scroll { offset: f32 },
    /// Only let time pass
    Wait,
}

/// A timed action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// A complete scenario
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub host: HostSpec,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario. Steps are ordered by time; steps at the same time
    /// keep their file order.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut scenario: Scenario =
            toml::from_str(content).context("Failed to parse scenario")?;
        scenario
            .carousel
            .validate()
            .context("Invalid [carousel] section")?;
        scenario.steps.sort_by_key(|step| step.at_ms);
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In {}", path.display()))
    }
}
