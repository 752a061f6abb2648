use crate::cropper::HandleId;
use crate::error::CropError;
use crate::geometry::{Point2D, Size2D};

/// Decoded input the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    DragBegin(HandleId),
    /// Translation since the previous drag event, in view space.
    DragChanged(Point2D),
    DragEnded,
    RotateRequested,
    CropRequested,
    ContainerResized(Size2D),
}

/// Anything that yields session events in delivery order.
pub trait EventSource {
    fn next_event(&mut self) -> Option<SessionEvent>;
}

impl<I> EventSource for I
where
    I: Iterator<Item = SessionEvent>,
{
    fn next_event(&mut self) -> Option<SessionEvent> {
        self.next()
    }
}

/// An event the session rejected, with the reason.
#[derive(Debug)]
pub struct EventFailure {
    pub event: SessionEvent,
    pub error: CropError,
}
