//! Handle repositioning for quarter-turn image rotation.
//!
//! Screen space is y-down, so adding π/2 to a point's azimuth turns it
//! clockwise on screen, matching the codec's positive rotation direction.
//!
//! ```text
//!   before          after (+90°)
//!   TL ─── TR       BL ─── TL
//!   │       │  ->   │       │
//!   BL ─── BR       BR ─── TR
//! ```
//!
//! Each logical handle must keep playing its role (top-left stays the
//! top-left drag target), so the new top-left takes the rotated position of the
//! old bottom-left, and so on around the cycle.

use std::f64::consts::FRAC_PI_2;

use super::CropQuadrilateral;
use crate::geometry::{Point2D, Size2D};

/// Rotates `target` around `origin` by `angle` radians in polar form, then
/// scales its distance from `origin` by `resize_ratio`.
pub fn rotate_point_around(
    origin: Point2D,
    target: Point2D,
    angle: f64,
    resize_ratio: f64,
) -> Point2D {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let radius = dx.hypot(dy);
    let azimuth = dy.atan2(dx) + angle;
    Point2D::new(
        origin.x + radius * azimuth.cos() * resize_ratio,
        origin.y + radius * azimuth.sin() * resize_ratio,
    )
}

/// Uniform scale between the displayed frame before and after a quarter turn.
///
/// The old vertical extent becomes the new horizontal one, so the new width
/// is compared with the previous height.
pub fn quarter_turn_resize_ratio(previous_frame: Size2D, new_frame: Size2D) -> f64 {
    new_frame.width / previous_frame.height
}

/// Handle centers after the image turns 90° clockwise around `origin`.
pub fn remap_for_quarter_turn(
    quad: &CropQuadrilateral,
    origin: Point2D,
    resize_ratio: f64,
) -> CropQuadrilateral {
    let turn = |target: Point2D| rotate_point_around(origin, target, FRAC_PI_2, resize_ratio);
    CropQuadrilateral::new(
        turn(quad.bottom_left),
        turn(quad.top_left),
        turn(quad.bottom_right),
        turn(quad.top_right),
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: four unscaled quarter turns return each handle to its start.
        #[test]
        fn prop_four_turns_are_identity(
            cx in -500.0f64..=500.0,
            cy in -500.0f64..=500.0,
            coords in prop::array::uniform8(-1000.0f64..=1000.0),
        ) {
            let origin = Point2D::new(cx, cy);
            let quad = CropQuadrilateral::new(
                Point2D::new(coords[0], coords[1]),
                Point2D::new(coords[2], coords[3]),
                Point2D::new(coords[4], coords[5]),
                Point2D::new(coords[6], coords[7]),
            );
            let mut turned = quad;
            for _ in 0..4 {
                turned = remap_for_quarter_turn(&turned, origin, 1.0);
            }
            for (handle, center) in quad.handles() {
                let restored = turned.get(handle);
                prop_assert!((restored.x - center.x).abs() < 1e-6);
                prop_assert!((restored.y - center.y).abs() < 1e-6);
            }
        }
    }
}
