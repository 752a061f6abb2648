use super::event::StateEvent;
use super::model::SessionState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: SessionState,
        event: StateEvent,
    },
    #[error("drag update received while {state:?}")]
    NoActiveDrag { state: SessionState },
}
