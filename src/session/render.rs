use crate::config::OutlineStyle;
use crate::cropper::CropQuadrilateral;
use crate::geometry::{Point2D, Rect};

/// Geometry to draw after a mutation: a dashed outline through the handles
/// and a dimmed mask over the image frame with the quadrilateral cut out
/// (even-odd fill).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub quadrilateral: CropQuadrilateral,
    pub mask: Rect,
    pub outline: OutlineStyle,
    pub mask_opacity: f64,
}

impl RenderFrame {
    /// Closed outline path, top-left first, clockwise.
    pub fn outline_path(&self) -> [Point2D; 4] {
        self.quadrilateral.outline()
    }
}

pub trait RenderSink {
    fn consume(&mut self, frame: &RenderFrame);
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderSink;

impl RenderSink for NoopRenderSink {
    fn consume(&mut self, _frame: &RenderFrame) {}
}

/// Keeps every frame, newest last.
impl RenderSink for Vec<RenderFrame> {
    fn consume(&mut self, frame: &RenderFrame) {
        self.push(frame.clone());
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn consume(&mut self, frame: &RenderFrame) {
        (**self).consume(frame);
    }
}
