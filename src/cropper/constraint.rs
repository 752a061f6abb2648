use super::{CropQuadrilateral, HandleId};
use crate::geometry::{Point2D, Rect};

/// Allowed interval for one handle coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    low: f64,
    high: f64,
}

impl AxisRange {
    /// Clamp for handles on the minimum side: the frame edge wins when the
    /// range is inverted.
    fn clamp_from_low(self, proposed: f64) -> f64 {
        self.low.max(proposed.min(self.high))
    }

    /// Mirrored clamp for handles on the maximum side.
    fn clamp_from_high(self, proposed: f64) -> f64 {
        self.high.min(proposed.max(self.low))
    }
}

fn x_range(handle: HandleId, quad: &CropQuadrilateral, frame: Rect) -> AxisRange {
    if handle.is_left() {
        AxisRange {
            low: frame.min_x(),
            high: quad.top_right.x.min(quad.bottom_right.x),
        }
    } else {
        AxisRange {
            low: quad.top_left.x.max(quad.bottom_left.x),
            high: frame.max_x(),
        }
    }
}

fn y_range(handle: HandleId, quad: &CropQuadrilateral, frame: Rect) -> AxisRange {
    if handle.is_top() {
        AxisRange {
            low: frame.min_y(),
            high: quad.bottom_left.y.min(quad.bottom_right.y),
        }
    } else {
        AxisRange {
            low: quad.top_left.y.max(quad.top_right.y),
            high: frame.max_y(),
        }
    }
}

/// New center for `handle` after moving it by `delta`, clamped to `frame`
/// and to the opposing handles. Only the dragged handle is computed; the
/// caller applies it.
pub fn constrain_handle(
    handle: HandleId,
    quad: &CropQuadrilateral,
    delta: Point2D,
    frame: Rect,
) -> Point2D {
    let current = quad.get(handle);
    let proposed = current.offset_by(delta);
    let x_range = x_range(handle, quad, frame);
    let y_range = y_range(handle, quad, frame);

    let x = if handle.is_left() {
        x_range.clamp_from_low(proposed.x)
    } else {
        x_range.clamp_from_high(proposed.x)
    };
    let y = if handle.is_top() {
        y_range.clamp_from_low(proposed.y)
    } else {
        y_range.clamp_from_high(proposed.y)
    };

    Point2D::new(x, y)
}
