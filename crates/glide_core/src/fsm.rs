//! State Machine Runtime
//!
//! Flat state machines for widget lifecycle states. A machine is a lookup
//! table from `(state, event)` to the next state plus a bounded history of
//! the transitions it took, which is what widgets log when debugging.
//!
//! Side effects live in the widget, not in the table: the widget decides what
//! to do and reports it to the machine with [`StateMachine::send`].

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

const DEFAULT_HISTORY_LIMIT: usize = 32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    table: FxHashMap<(StateId, EventId), StateId>,
    history_limit: usize,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            table: FxHashMap::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add a transition. A later transition for the same `(from, event)`
    /// pair replaces the earlier one.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.table.insert(
            (transition.from_state, transition.event),
            transition.to_state,
        );
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    /// Number of transitions kept in the history (0 disables it)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            table: self.table,
            history: VecDeque::with_capacity(self.history_limit.min(DEFAULT_HISTORY_LIMIT)),
            history_limit: self.history_limit,
        }
    }
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine {
    current_state: StateId,
    table: FxHashMap<(StateId, EventId), StateId>,
    history: VecDeque<Transition>,
    history_limit: usize,
}

impl StateMachine {
    /// Create a state machine from an initial state and a transition list
    pub fn new(initial_state: StateId, transitions: impl IntoIterator<Item = Transition>) -> Self {
        transitions
            .into_iter()
            .fold(StateMachineBuilder::new(initial_state), |builder, t| {
                builder.transition(t)
            })
            .build()
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Check if an event triggers a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.table.contains_key(&(self.current_state, event))
    }

    /// Send an event. Returns the new state if a transition matched (self
    /// loops included), `None` if the event is not handled in this state.
    pub fn send(&mut self, event: EventId) -> Option<StateId> {
        let from = self.current_state;
        let to = *self.table.get(&(from, event))?;

        self.current_state = to;
        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(Transition::new(from, event, to));
        }
        tracing::trace!(from, event, to, "fsm transition");

        Some(to)
    }

    /// Most recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
