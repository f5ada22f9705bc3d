//! Carousel controller
//!
//! Owns the layout metrics and reacts to host events:
//!
//! - **Mount**: subscribe to resize notifications, measure, snap to the start
//! - **Resize**: debounced, one full recompute per quiet period
//! - **Child count change**: marks the metrics dirty; the next settle
//!   recomputes
//! - **User scroll**: cheap button-visibility update
//! - **Navigation**: move one viewport width after a short delay, animated
//!
//! Every entry point takes the host timestamp and first runs whatever work
//! came due before it. Between events the host calls
//! [`Carousel::advance_to`], typically at [`Carousel::next_deadline`].
//!
//! # State machine
//!
//! ```text
//! UNINITIALIZED --MEASURED--> READY --MEASURED--> READY
//! ```

use glide_animation::{
    AnimationJob, AnimationToken, FrameClock, FrameOutcome, HostCapabilities, ScrollDriver,
    ScrollStart,
};
use glide_core::{
    event_types, Debouncer, Direction, Event, EventData, Expired, Notifier, StateId,
    StateMachine, Subscription, TimerId, TimerQueue, Timestamp, Transition,
};

use crate::config::CarouselConfig;
use crate::host::{ResizeEvent, ScrollContainer};
use crate::metrics::{ButtonVisibility, LayoutMetrics, ScrollMetrics};

/// Carousel lifecycle states
pub mod states {
    use glide_core::StateId;

    /// Nothing measured yet
    pub const UNINITIALIZED: StateId = 0;
    /// Metrics computed at least once
    pub const READY: StateId = 1;
}

/// Deferred controller work
#[derive(Clone, Copy, Debug, PartialEq)]
enum Task {
    /// Resize quiet period ended
    Resize,
    /// Navigation delay ended, start scrolling
    Navigate { target: f32 },
    /// Next animation frame
    Frame { token: AnimationToken },
}

fn carousel_fsm() -> StateMachine {
    StateMachine::builder(states::UNINITIALIZED)
        .on(states::UNINITIALIZED, event_types::MEASURED, states::READY)
        .on(states::READY, event_types::MEASURED, states::READY)
        .build()
}

type MoveListener = Box<dyn FnMut(Direction)>;

/// Headless carousel controller over a host container
pub struct Carousel<C: ScrollContainer> {
    config: CarouselConfig,
    container: C,
    fsm: StateMachine,
    metrics: ScrollMetrics,
    item_count: usize,
    dirty: bool,
    mounted: bool,
    timers: TimerQueue<Task>,
    resize: Debouncer<ResizeEvent>,
    resize_source: Notifier<ResizeEvent>,
    subscription: Option<Subscription<ResizeEvent>>,
    driver: ScrollDriver,
    capabilities: HostCapabilities,
    frames: Box<dyn FrameClock>,
    frame_timer: Option<TimerId>,
    move_listener: Option<MoveListener>,
    recompute_count: u64,
}

impl<C: ScrollContainer> Carousel<C> {
    /// Create a controller. Resize notifications from `resize_source` are
    /// received between [`mount`](Self::mount) and
    /// [`unmount`](Self::unmount).
    ///
    /// Durations above the configurable maximum are clamped.
    pub fn new(container: C, config: CarouselConfig, resize_source: &Notifier<ResizeEvent>) -> Self {
        let config = config.clamped();
        let capabilities = HostCapabilities::default();
        Self {
            item_count: container.rendered_children(),
            container,
            fsm: carousel_fsm(),
            metrics: ScrollMetrics::default(),
            dirty: false,
            mounted: false,
            timers: TimerQueue::new(),
            resize: Debouncer::new(config.scroll_debounce_duration()),
            resize_source: resize_source.clone(),
            subscription: None,
            driver: ScrollDriver::new().with_parity(config.require_parity),
            frames: config.frame_strategy.clock(&capabilities),
            capabilities,
            frame_timer: None,
            move_listener: None,
            recompute_count: 0,
            config,
        }
    }

    /// Declare what the host can do. Selects the frame clock.
    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.frames = self.config.frame_strategy.clock(&capabilities);
        self.capabilities = capabilities;
        self
    }

    /// Called with the direction of every accepted navigation, before the
    /// scroll starts.
    pub fn on_move<F>(mut self, listener: F) -> Self
    where
        F: FnMut(Direction) + 'static,
    {
        self.move_listener = Some(Box::new(listener));
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach to the host. Measures right away if items are rendered.
    pub fn mount(&mut self, now: Timestamp) {
        self.advance_to(now);
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.subscription = Some(self.resize_source.subscribe());
        tracing::debug!(
            frames = self.frames.name(),
            items = self.item_count,
            "carousel mounted"
        );

        if self.container.rendered_children() > 0 {
            self.recompute();
            if self.is_ready() {
                let start = self.metrics.min_position;
                self.driver
                    .scroll_to(&mut self.container, AnimationJob::instant(start));
                self.refresh_visibility();
            }
        }
    }

    /// Detach from the host. Pending work is dropped and the resize listener
    /// unregistered; later events are ignored until the next mount.
    pub fn unmount(&mut self, now: Timestamp) {
        self.advance_to(now);
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.subscription = None;
        self.resize.cancel(&mut self.timers);
        self.timers.clear();
        self.frame_timer = None;
        self.driver.cancel();
        tracing::debug!("carousel unmounted");
    }

    /// Report the current number of items. A change marks the metrics dirty
    /// until the next [`settle`](Self::settle).
    pub fn set_item_count(&mut self, now: Timestamp, count: usize) {
        self.advance_to(now);
        if count != self.item_count {
            tracing::debug!(from = self.item_count, to = count, "item count changed");
            self.item_count = count;
            self.dirty = true;
        }
    }

    /// The host finished rendering. Recomputes if the item count changed.
    pub fn settle(&mut self, now: Timestamp) {
        self.advance_to(now);
        if self.mounted && self.dirty {
            self.dirty = false;
            self.recompute();
        }
    }

    /// The user scrolled the container.
    pub fn on_scroll(&mut self, now: Timestamp) {
        self.advance_to(now);
        if !self.mounted || self.config.disabled {
            return;
        }
        self.refresh_visibility();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move one viewport width in `direction`.
    ///
    /// Returns the clamped target offset, or `None` if the carousel is
    /// disabled, unmounted or not yet measured. The scroll starts after the
    /// configured delay.
    pub fn navigate(&mut self, now: Timestamp, direction: Direction) -> Option<f32> {
        self.advance_to(now);
        if !self.mounted || self.config.disabled || !self.is_ready() {
            tracing::trace!(%direction, "navigation ignored");
            return None;
        }

        if let Some(listener) = self.move_listener.as_mut() {
            listener(direction);
        }

        let current = self.container.scroll_offset();
        let target = self
            .metrics
            .clamp(current + direction.sign() * self.metrics.visible_width);

        tracing::debug!(%direction, current, target, "navigation requested");
        self.timers
            .set_timeout(self.config.scroll_delay_duration(), Task::Navigate { target });
        Some(target)
    }

    pub fn navigate_left(&mut self, now: Timestamp) -> Option<f32> {
        self.navigate(now, Direction::Left)
    }

    pub fn navigate_right(&mut self, now: Timestamp) -> Option<f32> {
        self.navigate(now, Direction::Right)
    }

    // =========================================================================
    // Event pump
    // =========================================================================

    /// Dispatch a generic host event. Returns false for event types the
    /// carousel does not handle.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let now = event.timestamp;
        match (event.event_type, &event.data) {
            (event_types::MOUNT, _) => self.mount(now),
            (event_types::UNMOUNT, _) => self.unmount(now),
            (event_types::SCROLL, _) => self.on_scroll(now),
            (event_types::SETTLE, _) => self.settle(now),
            (event_types::CHILDREN_CHANGED, EventData::Children { count }) => {
                self.set_item_count(now, *count)
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.advance_to(now);
                if self.mounted {
                    self.queue_resize(
                        now,
                        ResizeEvent {
                            width: *width,
                            height: *height,
                        },
                    );
                }
            }
            (event_types::NAVIGATE, EventData::Navigate { direction }) => {
                self.navigate(now, *direction);
            }
            (event_type, _) => {
                tracing::trace!(event_type, "unhandled carousel event");
                return false;
            }
        }
        true
    }

    /// Run resize notifications and timers due at or before `now`, in
    /// timestamp order.
    pub fn advance_to(&mut self, now: Timestamp) {
        loop {
            let notification_at = self
                .subscription
                .as_ref()
                .and_then(Subscription::peek_at)
                .filter(|at| *at <= now);
            let timer_at = self.timers.next_deadline().filter(|at| *at <= now);

            match (notification_at, timer_at) {
                (Some(n), t) if t.map_or(true, |t| n <= t) => {
                    let Some(notification) = self
                        .subscription
                        .as_ref()
                        .and_then(|sub| sub.pop_until(now))
                    else {
                        break;
                    };
                    self.queue_resize(notification.at, notification.payload);
                }
                (_, Some(_)) => {
                    let Some(expired) = self.timers.pop_due(now) else {
                        break;
                    };
                    self.run(expired);
                }
                _ => break,
            }
        }
        self.timers.advance(now);
    }

    /// When the controller next has work to do
    pub fn next_deadline(&self) -> Option<Timestamp> {
        let notification = self.subscription.as_ref().and_then(Subscription::peek_at);
        match (notification, self.timers.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn queue_resize(&mut self, at: Timestamp, event: ResizeEvent) {
        self.timers.advance(at);
        tracing::trace!(width = event.width, height = event.height, "resize queued");
        self.resize.call(&mut self.timers, event, Task::Resize);
    }

    fn run(&mut self, expired: Expired<Task>) {
        match expired.task {
            Task::Resize => {
                if let Some(event) = self.resize.fire(expired.id) {
                    tracing::debug!(width = event.width, "viewport resized");
                    self.recompute();
                }
            }
            Task::Navigate { target } => self.start_scroll(target),
            Task::Frame { token } => {
                if self.frame_timer == Some(expired.id) {
                    self.frame_timer = None;
                }
                match self.driver.tick(token, &mut self.container) {
                    FrameOutcome::Continue(token) => {
                        self.refresh_visibility();
                        self.schedule_frame(token);
                    }
                    FrameOutcome::Completed(_) => self.refresh_visibility(),
                    FrameOutcome::Stale => {}
                }
            }
        }
    }

    fn start_scroll(&mut self, target: f32) {
        if let Some(id) = self.frame_timer.take() {
            self.timers.clear_timeout(id);
        }

        let job = AnimationJob::new(target, self.config.scroll_interval_duration())
            .with_easing(self.config.easing);
        let start = self.driver.scroll_to(&mut self.container, job);
        self.refresh_visibility();

        if let ScrollStart::Animating(token) = start {
            self.schedule_frame(token);
        }
    }

    fn schedule_frame(&mut self, token: AnimationToken) {
        let at = self.frames.next_frame(self.timers.now());
        self.frame_timer = Some(self.timers.schedule_at(at, Task::Frame { token }));
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    fn recompute(&mut self) {
        if !self.mounted {
            return;
        }

        if self.container.rendered_children() == 0 {
            tracing::debug!("no rendered items, metrics reset");
            self.metrics = ScrollMetrics::default();
            return;
        }

        if let Some(metrics) =
            LayoutMetrics::compute(&self.container, self.config.variant, self.item_count)
        {
            self.metrics = metrics;
            self.recompute_count += 1;
            self.fsm.send(event_types::MEASURED);
        }
    }

    fn refresh_visibility(&mut self) {
        if !self.is_ready() {
            return;
        }
        let visibility = ButtonVisibility::at_offset(self.container.scroll_offset(), &self.metrics);
        self.metrics = self.metrics.with_visibility(visibility);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn show_left_button(&self) -> bool {
        !self.config.disabled && self.metrics.show_left_button
    }

    pub fn show_right_button(&self) -> bool {
        !self.config.disabled && self.metrics.show_right_button
    }

    pub fn buttons(&self) -> ButtonVisibility {
        ButtonVisibility {
            left: self.show_left_button(),
            right: self.show_right_button(),
        }
    }

    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn is_ready(&self) -> bool {
        self.fsm.is_in(states::READY)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Item count changed since the last recompute
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable host access, e.g. to change the rendered items in tests.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// Name of the frame clock in use
    pub fn frame_clock(&self) -> &'static str {
        self.frames.name()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Number of full metrics computations so far
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Recent state transitions, oldest first
    pub fn state_history(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.fsm.history()
    }

    /// Toggle disabled mode at runtime.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.config.disabled == disabled {
            return;
        }
        self.config.disabled = disabled;
        if !disabled {
            self.refresh_visibility();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessContainer;
    use glide_animation::ScrollTarget;

    fn ms(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn mounted(container: HeadlessContainer, config: CarouselConfig) -> Carousel<HeadlessContainer> {
        let window = Notifier::new();
        let mut carousel = Carousel::new(container, config, &window);
        carousel.mount(ms(0));
        carousel
    }

    #[test]
    fn test_not_measured_before_mount() {
        let window = Notifier::new();
        let carousel = Carousel::new(
            HeadlessContainer::new(300.0).with_items(5, 100.0),
            CarouselConfig::default(),
            &window,
        );

        assert_eq!(carousel.state(), states::UNINITIALIZED);
        assert_eq!(carousel.recompute_count(), 0);
        assert!(!carousel.show_right_button());
        assert_eq!(window.listener_count(), 0);
    }

    #[test]
    fn test_mount_measures_and_snaps_to_start() {
        let mut container = HeadlessContainer::new(300.0).with_items(5, 100.0);
        container.set_scroll_offset(120.0);
        let carousel = mounted(container, CarouselConfig::default());

        assert!(carousel.is_ready());
        assert_eq!(carousel.container().scroll_offset(), 0.0);
        assert!(!carousel.show_left_button());
        assert!(carousel.show_right_button());
        assert_eq!(
            carousel.state_history().next(),
            Some(&Transition::new(
                states::UNINITIALIZED,
                event_types::MEASURED,
                states::READY
            ))
        );
    }

    #[test]
    fn test_navigation_waits_for_delay() {
        let mut carousel = mounted(
            HeadlessContainer::new(300.0).with_items(5, 100.0),
            CarouselConfig::default().scroll_delay(50),
        );
        carousel.container_mut().take_writes();

        assert_eq!(carousel.navigate_right(ms(100)), Some(300.0));
        carousel.advance_to(ms(149));
        assert!(carousel.container().offset_writes().is_empty());
        assert_eq!(carousel.next_deadline(), Some(ms(150)));

        carousel.advance_to(ms(150));
        assert!(carousel.is_animating());
    }

    #[test]
    fn test_navigation_target_is_clamped() {
        let mut carousel = mounted(
            HeadlessContainer::new(300.0).with_items(5, 100.0),
            CarouselConfig::default(),
        );

        assert_eq!(carousel.navigate_left(ms(10)), Some(0.0));
        carousel.advance_to(ms(1_000));
        assert_eq!(carousel.container().scroll_offset(), 0.0);
    }

    #[test]
    fn test_handle_event_routes_navigation() {
        let mut carousel = mounted(
            HeadlessContainer::new(300.0).with_items(5, 100.0),
            CarouselConfig::default(),
        );

        assert!(carousel.handle_event(&Event::navigate(ms(10), Direction::Right)));
        assert!(carousel.handle_event(&Event::settle(ms(1_000))));
        assert_eq!(carousel.container().scroll_offset(), 300.0);

        let unknown = Event::new(999, EventData::None, ms(1_001));
        assert!(!carousel.handle_event(&unknown));
    }

    #[test]
    fn test_oversized_interval_is_clamped() {
        let mut carousel = mounted(
            HeadlessContainer::new(300.0).with_items(5, 100.0),
            CarouselConfig::default().scroll_interval(1_000_000_000_000),
        );
        assert_eq!(carousel.config().scroll_interval_ms, 10_000);

        carousel.navigate_right(ms(0));
        carousel.advance_to(ms(20));
        assert!(carousel.is_animating());

        carousel.advance_to(ms(11_000));
        assert!(!carousel.is_animating());
        assert_eq!(carousel.container().scroll_offset(), 300.0);
    }

    #[test]
    fn test_set_disabled_restores_buttons() {
        let mut carousel = mounted(
            HeadlessContainer::new(300.0).with_items(5, 100.0),
            CarouselConfig::default().disabled(true),
        );
        assert!(!carousel.show_right_button());

        carousel.set_disabled(false);
        assert!(carousel.show_right_button());
    }
}
