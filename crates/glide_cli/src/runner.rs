//! Scenario replay
//!
//! Drives a [`Carousel`] over a [`HeadlessContainer`] through a scenario's
//! steps in virtual time and records snapshots of the visible state.

use std::fmt;

use glide_animation::ScrollTarget;
use glide_carousel::{states, Carousel, HeadlessContainer, ResizeEvent};
use glide_core::{Notifier, Timestamp};
use serde::Serialize;

use crate::scenario::{Action, Scenario};

/// Visible carousel state at one instant
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub t_ms: f64,
    pub offset: f32,
    pub left: bool,
    pub right: bool,
    pub state: &'static str,
    pub event: String,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10.3}ms  offset={:>8.2}  left={:<5}  right={:<5}  state={:<13}  {}",
            self.t_ms, self.offset, self.left, self.right, self.state, self.event
        )
    }
}

/// Replays one scenario
pub struct Runner {
    carousel: Carousel<HeadlessContainer>,
    window: Notifier<ResizeEvent>,
    scenario: Scenario,
    record_frames: bool,
    last: Timestamp,
    snapshots: Vec<Snapshot>,
}

impl Runner {
    pub fn new(scenario: Scenario) -> Self {
        let window = Notifier::new();
        let carousel = Carousel::new(
            scenario.host.container(),
            scenario.carousel.clone(),
            &window,
        )
        .on_move(|direction| tracing::info!(%direction, "move"))
        .with_capabilities(scenario.host.capabilities());

        Self {
            carousel,
            window,
            scenario,
            record_frames: false,
            last: Timestamp::ZERO,
            snapshots: Vec::new(),
        }
    }

    /// Also record a snapshot after every intermediate deadline (animation
    /// frames, debounce expiry, navigation delay).
    pub fn record_frames(mut self, record: bool) -> Self {
        self.record_frames = record;
        self
    }

    /// Run every step, then let pending work finish.
    pub fn run(mut self) -> Vec<Snapshot> {
        let steps = std::mem::take(&mut self.scenario.steps);
        tracing::debug!(steps = steps.len(), "replaying scenario");

        for step in steps {
            let now = Timestamp::from_millis(step.at_ms);
            self.run_until(now);
            let label = self.apply(now, &step.action);
            // Zero-delay work scheduled by the step belongs to this instant
            self.carousel.advance_to(now);
            self.record(now, label);
        }

        while let Some(at) = self.carousel.next_deadline() {
            self.carousel.advance_to(at);
            if self.record_frames {
                self.record(at, "tick".to_string());
            }
        }

        self.record(self.last, "end".to_string());
        self.snapshots
    }

    fn run_until(&mut self, until: Timestamp) {
        while let Some(at) = self.carousel.next_deadline().filter(|at| *at <= until) {
            self.carousel.advance_to(at);
            if self.record_frames {
                self.record(at, "tick".to_string());
            }
        }
        self.carousel.advance_to(until);
    }

    fn apply(&mut self, now: Timestamp, action: &Action) -> String {
        match action {
            Action::Mount => {
                self.carousel.mount(now);
                "mount".to_string()
            }
            Action::Unmount => {
                self.carousel.unmount(now);
                "unmount".to_string()
            }
            Action::Navigate { direction } => match self.carousel.navigate(now, *direction) {
                Some(target) => format!("navigate {direction} -> {target:.2}"),
                None => format!("navigate {direction} (ignored)"),
            },
            Action::Resize { width, height } => {
                self.carousel.container_mut().set_viewport_width(*width);
                let listeners = self.window.notify(
                    now,
                    ResizeEvent {
                        width: *width,
                        height: *height,
                    },
                );
                self.carousel.advance_to(now);
                format!("resize {width} ({listeners} listeners)")
            }
            Action::Items { count, width } => {
                let width = width.unwrap_or(self.scenario.host.item_width);
                self.carousel.container_mut().set_items(*count, width);
                self.carousel.set_item_count(now, *count);
                format!("items {count}")
            }
            Action::Settle => {
                let dirty = self.carousel.is_dirty();
                self.carousel.settle(now);
                if dirty {
                    "settle (recomputed)".to_string()
                } else {
                    "settle".to_string()
                }
            }
            Action::Scroll { offset } => {
                self.carousel.container_mut().set_scroll_offset(*offset);
                self.carousel.on_scroll(now);
                format!("scroll {offset}")
            }
            Action::Wait => "wait".to_string(),
        }
    }

    fn record(&mut self, at: Timestamp, event: String) {
        self.last = self.last.max(at);
        let state = if self.carousel.state() == states::READY {
            "ready"
        } else {
            "uninitialized"
        };
        self.snapshots.push(Snapshot {
            t_ms: at.as_millis_f64(),
            offset: self.carousel.container().scroll_offset(),
            left: self.carousel.show_left_button(),
            right: self.carousel.show_right_button(),
            state,
            event,
        });
    }
}
