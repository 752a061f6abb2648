use super::CropQuadrilateral;
use crate::error::CropFailure;
use crate::geometry::{Rect, Size2D};

/// Slack allowed when checking a pixel rect against the image bounds.
pub const PIXEL_BOUNDS_TOLERANCE: f64 = 1e-6;

/// Bounding crop rectangle of `quad`, relative to the displayed frame origin.
/// Taken from the min/max of opposing corners, so a handle sitting on an
/// opposing boundary still yields a well-formed rect.
pub fn crop_rect(quad: &CropQuadrilateral, frame: Rect) -> Rect {
    let min_x = quad.top_left.x.min(quad.bottom_left.x) - frame.min_x();
    let max_x = quad.top_right.x.max(quad.bottom_right.x) - frame.min_x();
    let min_y = quad.top_left.y.min(quad.top_right.y) - frame.min_y();
    let max_y = quad.bottom_left.y.max(quad.bottom_right.y) - frame.min_y();
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Scales a displayed-space rect into original pixel space.
///
/// Aspect-fit scales both axes uniformly, so the larger of the two per-axis
/// ratios is applied to every field.
pub fn map_to_pixel_space(rect: Rect, displayed_size: Size2D, pixel_size: Size2D) -> Rect {
    let factor = (pixel_size.width / displayed_size.width)
        .max(pixel_size.height / displayed_size.height);
    rect.scaled_by(factor)
}

/// Full pipeline from handles to a validated pixel rect ready for the codec.
///
/// Rejects rects with no area and rects that leave the image by more than
/// [`PIXEL_BOUNDS_TOLERANCE`]; rects inside the tolerance are clamped to the
/// image.
pub fn pixel_crop_rect(
    quad: &CropQuadrilateral,
    frame: Rect,
    pixel_size: Size2D,
) -> Result<Rect, CropFailure> {
    let displayed = crop_rect(quad, frame);
    let rect = map_to_pixel_space(displayed, frame.size, pixel_size);

    if !(rect.size.width > 0.0 && rect.size.height > 0.0) {
        return Err(CropFailure::EmptyRegion {
            width: rect.size.width,
            height: rect.size.height,
        });
    }

    let tolerance = PIXEL_BOUNDS_TOLERANCE;
    if rect.min_x() < -tolerance
        || rect.min_y() < -tolerance
        || rect.max_x() > pixel_size.width + tolerance
        || rect.max_y() > pixel_size.height + tolerance
    {
        return Err(CropFailure::OutOfBounds {
            rect,
            bounds: pixel_size,
        });
    }

    let min_x = rect.min_x().max(0.0);
    let min_y = rect.min_y().max(0.0);
    let max_x = rect.max_x().min(pixel_size.width);
    let max_y = rect.max_y().min(pixel_size.height);
    Ok(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::cropper::{constrain_handle, HandleId};
    use crate::geometry::Point2D;
    use proptest::prelude::*;

    proptest! {
        /// Property: crop rect sides are never negative for well-formed handles.
        #[test]
        fn prop_crop_rect_non_negative(
            frame_w in 1.0f64..=800.0,
            frame_h in 1.0f64..=800.0,
            drags in prop::collection::vec(
                (0usize..4, -500.0f64..=500.0, -500.0f64..=500.0),
                0..30,
            ),
        ) {
            let frame = Rect::new(0.0, 100.0, frame_w, frame_h);
            let mut quad = CropQuadrilateral::inset_from(frame, 40.0);
            for (index, dx, dy) in drags {
                let handle = HandleId::ALL[index];
                let next = constrain_handle(handle, &quad, Point2D::new(dx, dy), frame);
                quad.set(handle, next);
            }

            let rect = crop_rect(&quad, frame);
            prop_assert!(rect.size.width >= 0.0);
            prop_assert!(rect.size.height >= 0.0);
        }

        /// Property: a valid pixel rect always lies inside the image.
        #[test]
        fn prop_pixel_rect_inside_image(
            image_w in 1.0f64..=6000.0,
            image_h in 1.0f64..=6000.0,
            left in 0.0f64..=0.5,
            top in 0.0f64..=0.5,
            right in 0.5f64..=1.0,
            bottom in 0.5f64..=1.0,
        ) {
            let image = Size2D::new(image_w, image_h);
            let frame = crate::cropper::aspect_fit_frame(image, Size2D::new(400.0, 800.0))
                .expect("sizes are valid");
            let at = |fx: f64, fy: f64| {
                Point2D::new(
                    frame.min_x() + fx * frame.size.width,
                    frame.min_y() + fy * frame.size.height,
                )
            };
            let quad = CropQuadrilateral::new(
                at(left, top),
                at(right, top),
                at(left, bottom),
                at(right, bottom),
            );

            if let Ok(rect) = pixel_crop_rect(&quad, frame, image) {
                prop_assert!(rect.min_x() >= 0.0);
                prop_assert!(rect.min_y() >= 0.0);
                prop_assert!(rect.max_x() <= image_w * (1.0 + 1e-12));
                prop_assert!(rect.max_y() <= image_h * (1.0 + 1e-12));
            }
        }
    }
}
