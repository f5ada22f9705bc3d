//! Host interface
//!
//! What the carousel needs from the rendering environment: geometry of the
//! scroll container and its children, plus the scroll offset itself (via
//! [`ScrollTarget`]).

use glide_animation::ScrollTarget;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Payload of a viewport resize notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResizeEvent {
    pub width: f32,
    pub height: f32,
}

/// A rendered horizontal scroll container.
pub trait ScrollContainer: ScrollTarget {
    /// Bounding box of the container itself
    fn bounding_rect(&self) -> Rect;

    /// Laid-out width of the container, i.e. the visible width
    fn offset_width(&self) -> f32;

    /// Full scrollable width of the content
    fn scroll_width(&self) -> f32;

    /// Number of children currently rendered
    fn rendered_children(&self) -> usize;

    /// Bounding box of the child at `index`, already shifted by the scroll
    /// offset
    fn child_rect(&self, index: usize) -> Option<Rect>;

    fn first_child_rect(&self) -> Option<Rect> {
        self.child_rect(0)
    }

    fn last_child_rect(&self) -> Option<Rect> {
        let count = self.rendered_children();
        if count == 0 {
            return None;
        }
        self.child_rect(count - 1)
    }
}
