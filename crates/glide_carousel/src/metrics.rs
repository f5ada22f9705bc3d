//! Layout metrics
//!
//! Derives the scroll range and button visibility from rendered geometry.
//! Metrics are always recomputed in full; the only incremental update is
//! [`ButtonVisibility::at_offset`], used while the user scrolls.

use crate::config::Variant;
use crate::host::ScrollContainer;

/// Layout-dependent carousel state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Width of one item (unit of traversal)
    pub element_width: f32,
    /// Width of the viewport
    pub visible_width: f32,
    /// Width of all items together
    pub total_width: f32,
    /// Smallest allowed offset (always 0)
    pub min_position: f32,
    /// Largest allowed offset: the content's scroll width
    pub max_position: f32,
    pub show_left_button: bool,
    pub show_right_button: bool,
}

impl ScrollMetrics {
    /// Offset from which the right button hides
    pub fn hide_right_after(&self) -> f32 {
        self.max_position - self.visible_width
    }

    /// Clamp an offset into `[min_position, max_position]`
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.min_position, self.max_position.max(self.min_position))
    }

    /// Same metrics with new button flags
    pub fn with_visibility(self, visibility: ButtonVisibility) -> Self {
        Self {
            show_left_button: visibility.left,
            show_right_button: visibility.right,
            ..self
        }
    }

    pub fn visibility(&self) -> ButtonVisibility {
        ButtonVisibility {
            left: self.show_left_button,
            right: self.show_right_button,
        }
    }
}

/// Which navigation buttons are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonVisibility {
    pub left: bool,
    pub right: bool,
}

impl ButtonVisibility {
    pub const HIDDEN: ButtonVisibility = ButtonVisibility {
        left: false,
        right: false,
    };

    /// Flags for `offset` against already computed metrics. Unmeasured or
    /// zero-width items keep both buttons hidden.
    pub fn at_offset(offset: f32, metrics: &ScrollMetrics) -> Self {
        if metrics.element_width <= 0.0 {
            return Self::HIDDEN;
        }
        Self {
            left: offset > metrics.min_position,
            right: offset < metrics.hide_right_after(),
        }
    }
}

/// Layout metrics calculator
pub struct LayoutMetrics;

impl LayoutMetrics {
    /// Measure `container`. Returns `None` until a first child is rendered.
    pub fn compute<C>(container: &C, variant: Variant, item_count: usize) -> Option<ScrollMetrics>
    where
        C: ScrollContainer + ?Sized,
    {
        let first = container.first_child_rect()?;
        let last = container.last_child_rect()?;

        let element_width = first.width.max(0.0);
        let visible_width = container.offset_width();
        let scroll_width = container.scroll_width();

        if element_width <= 0.0 {
            tracing::warn!("carousel items have no width, hiding navigation");
            return Some(ScrollMetrics {
                visible_width,
                ..Default::default()
            });
        }

        let total_width = match variant {
            Variant::Menu => scroll_width,
            Variant::Carousel => item_count as f32 * element_width,
        };

        let metrics = ScrollMetrics {
            element_width,
            visible_width,
            total_width,
            min_position: 0.0,
            max_position: scroll_width,
            show_left_button: container.scroll_offset() > 0.0,
            show_right_button: container.bounding_rect().right() < last.right(),
        };

        tracing::debug!(
            element_width,
            visible_width,
            total_width,
            max_position = metrics.max_position,
            "carousel metrics computed"
        );

        Some(metrics)
    }
}
