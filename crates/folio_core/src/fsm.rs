//! State Machine Runtime
//!
//! Flat state machines for interaction states. States and events are plain
//! integer constants so that each component can declare its own vocabulary:
//!
//! ```rust
//! use folio_core::fsm::{StateMachine, StateId, EventId};
//!
//! const IDLE: StateId = 0;
//! const ARMED: StateId = 1;
//! const ENTER: EventId = 1;
//! const LEAVE: EventId = 2;
//!
//! let mut fsm = StateMachine::builder(IDLE)
//!     .on(IDLE, ENTER, ARMED)
//!     .on(ARMED, LEAVE, IDLE)
//!     .build();
//!
//! assert_eq!(fsm.send(ENTER), Some((IDLE, ARMED)));
//! assert_eq!(fsm.send(ENTER), None);
//! ```
//!
//! Conditions that depend on time or component data are evaluated by the
//! owner before it sends an event, so the table itself stays pure.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Default number of transitions kept for debugging
const DEFAULT_HISTORY_LIMIT: usize = 32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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
    transitions: SmallVec<[Transition; 8]>,
    history_limit: usize,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    /// Maximum number of transitions kept in [`StateMachine::history`]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn build(self) -> StateMachine {
        let mut machine = StateMachine::new(self.initial_state, self.transitions);
        machine.history_limit = self.history_limit;
        machine
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    table: FxHashMap<(StateId, EventId), StateId>,
    /// Recent transitions, oldest first
    history: VecDeque<(StateId, EventId, StateId)>,
    history_limit: usize,
}

impl StateMachine {
    /// Create a state machine with an initial state and transitions
    ///
    /// If two transitions share the same `(from, event)` pair, the first one wins.
    pub fn new(initial_state: StateId, transitions: impl IntoIterator<Item = Transition>) -> Self {
        let mut table = FxHashMap::default();
        for t in transitions {
            if table.contains_key(&(t.from_state, t.event)) {
                tracing::warn!(
                    "StateMachine: duplicate transition from {} on event {} ignored",
                    t.from_state,
                    t.event
                );
                continue;
            }
            table.insert((t.from_state, t.event), t.to_state);
        }

        Self {
            current_state: initial_state,
            table,
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
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

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.table.contains_key(&(self.current_state, event))
    }

    /// Send an event, returning `(from, to)` if a transition happened
    ///
    /// Self-transitions (from == to) are reported and recorded like any other.
    pub fn send(&mut self, event: EventId) -> Option<(StateId, StateId)> {
        let from = self.current_state;
        let to = *self.table.get(&(from, event))?;

        self.current_state = to;
        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back((from, event, to));
        }

        Some((from, to))
    }

    /// Force the machine into `state` without consulting the table
    ///
    /// Used on teardown to return a component to its resting state.
    pub fn reset(&mut self, state: StateId) {
        self.current_state = state;
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(StateId, EventId, StateId)> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 0;
    const HOVERED: StateId = 1;
    const PRESSED: StateId = 2;

    const POINTER_ENTER: EventId = 1;
    const POINTER_LEAVE: EventId = 2;
    const POINTER_DOWN: EventId = 3;
    const POINTER_UP: EventId = 4;

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(
            IDLE,
            [
                Transition::new(IDLE, POINTER_ENTER, HOVERED),
                Transition::new(HOVERED, POINTER_LEAVE, IDLE),
                Transition::new(HOVERED, POINTER_DOWN, PRESSED),
                Transition::new(PRESSED, POINTER_UP, HOVERED),
            ],
        );

        assert_eq!(fsm.send(POINTER_ENTER), Some((IDLE, HOVERED)));
        assert_eq!(fsm.send(POINTER_DOWN), Some((HOVERED, PRESSED)));
        assert_eq!(fsm.send(POINTER_UP), Some((PRESSED, HOVERED)));
        assert_eq!(fsm.send(POINTER_LEAVE), Some((HOVERED, IDLE)));
        assert!(fsm.is_in(IDLE));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(IDLE, [Transition::new(IDLE, POINTER_ENTER, HOVERED)]);

        assert_eq!(fsm.send(POINTER_DOWN), None);
        assert_eq!(fsm.current_state(), IDLE);
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_duplicate_transition_first_wins() {
        let mut fsm = StateMachine::builder(IDLE)
            .on(IDLE, POINTER_ENTER, HOVERED)
            .on(IDLE, POINTER_ENTER, PRESSED)
            .build();

        fsm.send(POINTER_ENTER);
        assert_eq!(fsm.current_state(), HOVERED);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::builder(IDLE)
            .on(IDLE, POINTER_ENTER, HOVERED)
            .on(HOVERED, POINTER_LEAVE, IDLE)
            .history_limit(3)
            .build();

        for _ in 0..5 {
            fsm.send(POINTER_ENTER);
            fsm.send(POINTER_LEAVE);
        }

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2], (HOVERED, POINTER_LEAVE, IDLE));
    }

    #[test]
    fn test_can_send_and_reset() {
        let mut fsm = StateMachine::new(IDLE, [Transition::new(IDLE, POINTER_ENTER, HOVERED)]);

        assert!(fsm.can_send(POINTER_ENTER));
        assert!(!fsm.can_send(POINTER_DOWN));

        fsm.send(POINTER_ENTER);
        fsm.reset(IDLE);
        assert!(fsm.is_in(IDLE));
    }
}
