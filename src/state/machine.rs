use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::{SessionState, StateEvent, StateTransition};

const TRANSITION_HISTORY_LIMIT: usize = 32;

#[derive(Debug)]
pub struct StateMachine {
    state: SessionState,
    transition_history: VecDeque<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            transition_history: VecDeque::with_capacity(TRANSITION_HISTORY_LIMIT),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn can_transition(&self, event: StateEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: StateEvent) -> Option<SessionState> {
        use StateEvent::*;
        match (self.state, event) {
            (SessionState::Idle, BeginDrag(handle)) => Some(SessionState::Dragging(handle)),
            (SessionState::Dragging(_), EndDrag) => Some(SessionState::Idle),
            (SessionState::Idle, BeginProcessing(operation)) => {
                Some(SessionState::Processing(operation))
            }
            (SessionState::Processing(_), FinishProcessing) => Some(SessionState::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: StateEvent) -> StateResult<SessionState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history
            .push_back(StateTransition::new(self.state, event, next));
        self.state = next;

        Ok(self.state)
    }

    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.transition_history.back()
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> Vec<StateTransition> {
        self.transition_history.iter().copied().collect()
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cropper::HandleId;
    use crate::state::SessionOperation;

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = StateMachine::new();
        assert!(machine.can_transition(StateEvent::BeginDrag(HandleId::TopLeft)));
        assert!(machine.can_transition(StateEvent::BeginProcessing(SessionOperation::Crop)));
        assert!(!machine.can_transition(StateEvent::EndDrag));

        let _ = machine
            .transition(StateEvent::BeginDrag(HandleId::TopLeft))
            .expect("idle -> dragging should transition");

        assert!(machine.can_transition(StateEvent::EndDrag));
        assert!(!machine.can_transition(StateEvent::BeginDrag(HandleId::TopRight)));
        assert!(!machine.can_transition(StateEvent::BeginProcessing(SessionOperation::Rotate)));
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = StateMachine::new();
        let _ = machine
            .transition(StateEvent::BeginDrag(HandleId::BottomRight))
            .expect("begin drag should work");
        let _ = machine
            .transition(StateEvent::EndDrag)
            .expect("end drag should work");
        let _ = machine
            .transition(StateEvent::BeginProcessing(SessionOperation::Rotate))
            .expect("begin processing should work");
        let _ = machine
            .transition(StateEvent::FinishProcessing)
            .expect("finish processing should work");

        assert_eq!(machine.state(), SessionState::Idle);
        assert_eq!(
            machine.history(),
            vec![
                StateTransition::new(
                    SessionState::Idle,
                    StateEvent::BeginDrag(HandleId::BottomRight),
                    SessionState::Dragging(HandleId::BottomRight)
                ),
                StateTransition::new(
                    SessionState::Dragging(HandleId::BottomRight),
                    StateEvent::EndDrag,
                    SessionState::Idle
                ),
                StateTransition::new(
                    SessionState::Idle,
                    StateEvent::BeginProcessing(SessionOperation::Rotate),
                    SessionState::Processing(SessionOperation::Rotate)
                ),
                StateTransition::new(
                    SessionState::Processing(SessionOperation::Rotate),
                    StateEvent::FinishProcessing,
                    SessionState::Idle
                ),
            ]
        );
    }

    #[test]
    fn history_keeps_only_the_most_recent_transitions() {
        let mut machine = StateMachine::new();
        for _ in 0..TRANSITION_HISTORY_LIMIT {
            machine
                .transition(StateEvent::BeginDrag(HandleId::TopLeft))
                .expect("begin drag should work");
            machine
                .transition(StateEvent::EndDrag)
                .expect("end drag should work");
        }
        assert_eq!(machine.history().len(), TRANSITION_HISTORY_LIMIT);
        assert_eq!(
            machine.last_transition().map(|record| record.event),
            Some(StateEvent::EndDrag)
        );
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut machine = StateMachine::new();
        machine
            .transition(StateEvent::BeginProcessing(SessionOperation::Crop))
            .expect("idle -> processing should transition");

        let err = machine
            .transition(StateEvent::BeginDrag(HandleId::TopLeft))
            .expect_err("processing -> dragging should fail");
        assert_eq!(
            err,
            StateError::InvalidStateTransition {
                from: SessionState::Processing(SessionOperation::Crop),
                event: StateEvent::BeginDrag(HandleId::TopLeft),
            }
        );
        assert_eq!(
            machine.state(),
            SessionState::Processing(SessionOperation::Crop)
        );
        assert_eq!(machine.history().len(), 1);
    }
}
