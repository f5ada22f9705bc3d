//! Glide CLI
//!
//! Replays carousel scenarios against the headless host. The binary is a
//! thin wrapper; scenario parsing and replay live here so they can be
//! tested without spawning a process.

pub mod runner;
pub mod scenario;

pub use runner::{Runner, Snapshot};
pub use scenario::{Action, HostSpec, Scenario, Step, EXAMPLE_SCENARIO};
