pub mod constraint;
pub mod mapper;
pub mod region;
pub mod rotation;

use crate::geometry::{Point2D, Rect};

pub use constraint::constrain_handle;
pub use mapper::{aspect_fit_frame, percentage_of, scale};
pub use region::{crop_rect, map_to_pixel_space, pixel_crop_rect};
pub use rotation::{quarter_turn_resize_ratio, remap_for_quarter_turn, rotate_point_around};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HandleId {
    pub const ALL: [HandleId; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    pub const fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|handle| handle.label().eq_ignore_ascii_case(value.trim()))
    }
}

/// The four handle centers, in view space.
///
/// Kept well-formed by [`constrain_handle`]: left handles never pass right
/// handles on x, top handles never pass bottom handles on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropQuadrilateral {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_left: Point2D,
    pub bottom_right: Point2D,
}

impl CropQuadrilateral {
    pub const fn new(
        top_left: Point2D,
        top_right: Point2D,
        bottom_left: Point2D,
        bottom_right: Point2D,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Default handle layout: each corner of `frame` pulled inward by `inset`.
    ///
    /// The inset is capped at half the frame's smaller side so thin frames
    /// collapse the handles onto a line instead of inverting them.
    pub fn inset_from(frame: Rect, inset: f64) -> Self {
        let max_inset = (frame.size.width.min(frame.size.height) / 2.0).max(0.0);
        let inset = inset.clamp(0.0, max_inset);
        let left = frame.min_x() + inset;
        let right = (frame.max_x() - inset).max(left);
        let top = frame.min_y() + inset;
        let bottom = (frame.max_y() - inset).max(top);
        Self::new(
            Point2D::new(left, top),
            Point2D::new(right, top),
            Point2D::new(left, bottom),
            Point2D::new(right, bottom),
        )
    }

    pub const fn get(&self, handle: HandleId) -> Point2D {
        match handle {
            HandleId::TopLeft => self.top_left,
            HandleId::TopRight => self.top_right,
            HandleId::BottomLeft => self.bottom_left,
            HandleId::BottomRight => self.bottom_right,
        }
    }

    pub fn set(&mut self, handle: HandleId, center: Point2D) {
        match handle {
            HandleId::TopLeft => self.top_left = center,
            HandleId::TopRight => self.top_right = center,
            HandleId::BottomLeft => self.bottom_left = center,
            HandleId::BottomRight => self.bottom_right = center,
        }
    }

    pub fn handles(&self) -> [(HandleId, Point2D); 4] {
        HandleId::ALL.map(|handle| (handle, self.get(handle)))
    }

    /// Closed outline order used for drawing: clockwise from the top-left.
    pub fn outline(&self) -> [Point2D; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn is_well_formed(&self) -> bool {
        self.top_left.x <= self.top_right.x
            && self.bottom_left.x <= self.bottom_right.x
            && self.top_left.x <= self.bottom_right.x
            && self.bottom_left.x <= self.top_right.x
            && self.top_left.y <= self.bottom_left.y
            && self.top_right.y <= self.bottom_right.y
            && self.top_left.y <= self.bottom_right.y
            && self.top_right.y <= self.bottom_left.y
    }

    /// Handle whose square hit area of side `hit_size` contains `point`.
    /// Overlapping hit areas resolve to the nearest center.
    pub fn handle_at(&self, point: Point2D, hit_size: f64) -> Option<HandleId> {
        self.handles()
            .into_iter()
            .filter(|(_, center)| Rect::centered_square(*center, hit_size).contains(point))
            .min_by(|(_, a), (_, b)| point.distance_to(*a).total_cmp(&point.distance_to(*b)))
            .map(|(handle, _)| handle)
    }
}
