use super::model::{SessionOperation, SessionState};
use crate::cropper::HandleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    BeginDrag(HandleId),
    EndDrag,
    BeginProcessing(SessionOperation),
    FinishProcessing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SessionState,
    pub event: StateEvent,
    pub to: SessionState,
}

impl StateTransition {
    pub const fn new(from: SessionState, event: StateEvent, to: SessionState) -> Self {
        Self { from, event, to }
    }
}
