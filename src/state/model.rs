use crate::cropper::HandleId;

/// Codec-backed operations that lock the session while they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOperation {
    Rotate,
    Crop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Dragging(HandleId),
    Processing(SessionOperation),
}

impl SessionState {
    pub const fn dragging_handle(self) -> Option<HandleId> {
        match self {
            Self::Dragging(handle) => Some(handle),
            _ => None,
        }
    }
}
