//! Widget events
//!
//! The event vocabulary hosts use to drive Glide widgets. Event types are
//! plain integers so they can double as state machine event ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Event type identifier
pub type EventType = u32;

/// Event types understood by Glide widgets
pub mod event_types {
    use super::EventType;

    /// User scrolled the container
    pub const SCROLL: EventType = 30;
    /// Viewport resized
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
    /// Number of child items changed
    pub const CHILDREN_CHANGED: EventType = 62;
    /// A render pass finished and geometry is current
    pub const SETTLE: EventType = 63;
    /// Layout metrics were (re)computed
    pub const MEASURED: EventType = 64;

    /// Navigation control activated
    pub const NAVIGATE: EventType = 90;
}

/// Horizontal navigation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "<" => Ok(Direction::Left),
            "right" | "r" | ">" => Ok(Direction::Right),
            other => Err(format!("unknown direction `{other}`")),
        }
    }
}

/// A widget event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: Timestamp,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Resize { width: f32, height: f32 },
    Children { count: usize },
    Navigate { direction: Direction },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData, timestamp: Timestamp) -> Self {
        Self {
            event_type,
            data,
            timestamp,
        }
    }

    pub fn mount(at: Timestamp) -> Self {
        Self::new(event_types::MOUNT, EventData::None, at)
    }

    pub fn unmount(at: Timestamp) -> Self {
        Self::new(event_types::UNMOUNT, EventData::None, at)
    }

    pub fn scroll(at: Timestamp) -> Self {
        Self::new(event_types::SCROLL, EventData::None, at)
    }

    pub fn settle(at: Timestamp) -> Self {
        Self::new(event_types::SETTLE, EventData::None, at)
    }

    pub fn resize(at: Timestamp, width: f32, height: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { width, height }, at)
    }

    pub fn children_changed(at: Timestamp, count: usize) -> Self {
        Self::new(event_types::CHILDREN_CHANGED, EventData::Children { count }, at)
    }

    pub fn navigate(at: Timestamp, direction: Direction) -> Self {
        Self::new(event_types::NAVIGATE, EventData::Navigate { direction }, at)
    }
}
