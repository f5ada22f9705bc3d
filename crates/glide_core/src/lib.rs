//! Glide Core Runtime
//!
//! This crate provides the foundational primitives shared by the Glide
//! widget crates:
//!
//! - **Virtual time**: [`Timestamp`] and a cooperative [`TimerQueue`]
//! - **Debouncing**: coalesce bursts of triggers into one call
//! - **Notifications**: subscribe/unsubscribe handles onto a host event source
//! - **State Machines**: flat transition tables for widget lifecycle states
//! - **Events**: the event vocabulary hosts use to drive widgets
//!
//! Everything here is single-threaded. Deferred work never runs on its own:
//! the owner pumps the queue with a timestamp supplied by the host.
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Debounced, Timestamp};
//! use std::time::Duration;
//!
//! let mut fired = Vec::new();
//! let mut resize = Debounced::new(Duration::from_millis(100), |width: u32| fired.push(width));
//!
//! resize.call(Timestamp::from_millis(0), 800);
//! resize.call(Timestamp::from_millis(40), 640);
//! resize.advance_to(Timestamp::from_millis(500));
//! drop(resize);
//!
//! assert_eq!(fired, vec![640]);
//! ```

pub mod debounce;
pub mod events;
pub mod fsm;
pub mod notify;
pub mod time;
pub mod timer;

pub use debounce::{DebounceEdge, Debounced, Debouncer};
pub use events::{event_types, Direction, Event, EventData, EventType};
pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder, Transition};
pub use notify::{ListenerId, Notification, Notifier, Subscription};
pub use time::Timestamp;
pub use timer::{Expired, TimerId, TimerQueue};
