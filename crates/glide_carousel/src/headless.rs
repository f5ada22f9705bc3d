//! Headless host
//!
//! An in-memory [`ScrollContainer`] with a fixed viewport and a row of
//! items laid out left to right. Used by tests and the `glide` CLI to replay
//! carousel behavior without a renderer.

use glide_animation::{ScrollBehavior, ScrollTarget};

use crate::host::{Rect, ScrollContainer};

/// In-memory scroll container
#[derive(Clone, Debug, Default)]
pub struct HeadlessContainer {
    viewport_width: f32,
    viewport_height: f32,
    item_widths: Vec<f32>,
    offset: f32,
    native_smooth: bool,
    writes: Vec<f32>,
}

impl HeadlessContainer {
    /// Empty container with a viewport `viewport_width` pixels wide
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width: viewport_width.max(0.0),
            viewport_height: 0.0,
            ..Default::default()
        }
    }

    /// Add `count` items of equal `width`
    pub fn with_items(mut self, count: usize, width: f32) -> Self {
        self.set_items(count, width);
        self
    }

    /// Add items with individual widths
    pub fn with_item_widths(mut self, widths: impl IntoIterator<Item = f32>) -> Self {
        self.item_widths = widths.into_iter().map(|w| w.max(0.0)).collect();
        self
    }

    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height.max(0.0);
        self
    }

    /// Report native smooth scrolling support
    pub fn with_native_smooth_scroll(mut self, supported: bool) -> Self {
        self.native_smooth = supported;
        self
    }

    /// Replace all items with `count` items of equal `width`
    pub fn set_items(&mut self, count: usize, width: f32) {
        self.item_widths = vec![width.max(0.0); count];
        self.offset = self.clamp(self.offset);
    }

    /// Resize the viewport, as a window resize would
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
        self.offset = self.clamp(self.offset);
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_native_smooth(&mut self, supported: bool) {
        self.native_smooth = supported;
    }

    pub fn item_widths(&self) -> &[f32] {
        &self.item_widths
    }

    /// Sum of all item widths
    pub fn content_width(&self) -> f32 {
        self.item_widths.iter().sum()
    }

    /// Every offset written so far, in order
    pub fn offset_writes(&self) -> &[f32] {
        &self.writes
    }

    /// Drain the write log
    pub fn take_writes(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.writes)
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.scroll_width())
    }
}

impl ScrollTarget for HeadlessContainer {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.offset = self.clamp(offset);
        self.writes.push(self.offset);
    }

    fn supports_native_smooth_scroll(&self) -> bool {
        self.native_smooth
    }

    fn native_scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        tracing::trace!(offset, ?behavior, "native scroll");
        self.set_scroll_offset(offset);
    }
}

impl ScrollContainer for HeadlessContainer {
    fn bounding_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height)
    }

    fn offset_width(&self) -> f32 {
        self.viewport_width
    }

    fn scroll_width(&self) -> f32 {
        self.content_width().max(self.viewport_width)
    }

    fn rendered_children(&self) -> usize {
        self.item_widths.len()
    }

    fn child_rect(&self, index: usize) -> Option<Rect> {
        let width = *self.item_widths.get(index)?;
        let left: f32 = self.item_widths[..index].iter().sum();
        Some(Rect::new(
            left - self.offset,
            0.0,
            width,
            self.viewport_height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_shift_with_offset() {
        let mut container = HeadlessContainer::new(300.0).with_items(5, 100.0);
        container.set_scroll_offset(150.0);

        assert_eq!(container.first_child_rect().unwrap().left, -150.0);
        assert_eq!(container.last_child_rect().unwrap().right(), 350.0);
        assert_eq!(container.child_rect(5), None);
    }

    #[test]
    fn test_offset_is_clamped_to_scroll_width() {
        let mut container = HeadlessContainer::new(300.0).with_items(5, 100.0);

        container.set_scroll_offset(-10.0);
        container.set_scroll_offset(900.0);

        assert_eq!(container.offset_writes(), &[0.0, 500.0]);
    }

    #[test]
    fn test_scroll_width_never_below_viewport() {
        let container = HeadlessContainer::new(300.0).with_items(2, 100.0);
        assert_eq!(container.scroll_width(), 300.0);
        assert_eq!(HeadlessContainer::new(300.0).last_child_rect(), None);
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut container = HeadlessContainer::new(100.0).with_items(10, 50.0);
        container.set_scroll_offset(400.0);

        container.set_items(3, 50.0);
        assert_eq!(container.scroll_offset(), 150.0);
    }
}
