//! Glide Carousel
//!
//! A horizontally scrolling list that shows a window onto items wider than
//! its viewport, with left/right navigation controls that appear only when
//! there is somewhere to go.
//!
//! The crate is headless: the rendering environment implements
//! [`ScrollContainer`] and routes its events to a [`Carousel`], which keeps
//! the layout metrics, decides button visibility and animates navigation.
//!
//! # Example
//!
//! ```rust
//! use glide_carousel::prelude::*;
//!
//! let window = Notifier::new();
//! let container = HeadlessContainer::new(300.0).with_items(5, 100.0);
//! let mut carousel = Carousel::new(container, CarouselConfig::default(), &window);
//!
//! carousel.mount(Timestamp::ZERO);
//! assert!(!carousel.show_left_button());
//! assert!(carousel.show_right_button());
//!
//! carousel.navigate(Timestamp::from_millis(100), Direction::Right);
//! carousel.advance_to(Timestamp::from_millis(1_000));
//!
//! assert_eq!(carousel.container().scroll_offset(), 300.0);
//! assert!(carousel.show_left_button());
//! assert!(!carousel.show_right_button());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod headless;
pub mod host;
pub mod metrics;

pub use config::{CarouselConfig, Variant};
pub use controller::{states, Carousel};
pub use error::{ConfigError, Result};
pub use headless::HeadlessContainer;
pub use host::{Rect, ResizeEvent, ScrollContainer};
pub use metrics::{ButtonVisibility, LayoutMetrics, ScrollMetrics};

/// Everything a host needs to drive a carousel
pub mod prelude {
    pub use crate::config::{CarouselConfig, Variant};
    pub use crate::controller::{states, Carousel};
    pub use crate::headless::HeadlessContainer;
    pub use crate::host::{Rect, ResizeEvent, ScrollContainer};
    pub use crate::metrics::{ButtonVisibility, ScrollMetrics};
    pub use glide_animation::{Easing, FrameStrategy, HostCapabilities, ScrollTarget};
    pub use glide_core::{Direction, Event, Notifier, Timestamp};
}
