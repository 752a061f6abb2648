use crate::geometry::{Point2D, Rect, Size2D};

/// Expresses `point` as a fraction of `size`.
///
/// Callers must guard against zero-sized `size`; the result is then infinite
/// or NaN.
pub fn percentage_of(point: Point2D, size: Size2D) -> Point2D {
    Point2D::new(point.x / size.width, point.y / size.height)
}

/// Inverse of [`percentage_of`].
pub fn scale(point: Point2D, size: Size2D) -> Point2D {
    Point2D::new(point.x * size.width, point.y * size.height)
}

/// Where an image of `image_size` is drawn inside `container_size` when
/// scaled to fit while keeping its aspect ratio, centered on both axes.
///
/// Returns `None` when either size is degenerate.
pub fn aspect_fit_frame(image_size: Size2D, container_size: Size2D) -> Option<Rect> {
    if image_size.is_degenerate() || container_size.is_degenerate() {
        return None;
    }

    let height_ratio = image_size.height / image_size.width;
    let height = (container_size.width * height_ratio).min(container_size.height);
    let width = height / height_ratio;
    let vertical_inset = ((container_size.height - height) / 2.0).max(0.0);
    let horizontal_inset = (container_size.width - width) / 2.0;

    Some(Rect::new(horizontal_inset, vertical_inset, width, height))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn size_strategy() -> impl Strategy<Value = Size2D> {
        (1.0f64..=5000.0, 1.0f64..=5000.0).prop_map(|(w, h)| Size2D::new(w, h))
    }

    proptest! {
        /// Property: scaling a percentage point back yields the original point.
        #[test]
        fn prop_percentage_round_trip(
            size in size_strategy(),
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let point = Point2D::new(fx * size.width, fy * size.height);
            let back = scale(percentage_of(point, size), size);
            prop_assert!((back.x - point.x).abs() <= 1e-9 * size.width.max(1.0));
            prop_assert!((back.y - point.y).abs() <= 1e-9 * size.height.max(1.0));
        }

        /// Property: the fitted frame stays inside the container and keeps the
        /// image aspect ratio.
        #[test]
        fn prop_fit_frame_inside_container(
            image in size_strategy(),
            container in size_strategy(),
        ) {
            let frame = aspect_fit_frame(image, container).expect("sizes are valid");
            let tolerance = 1e-9 * container.width.max(container.height);
            prop_assert!(frame.min_x() >= -tolerance);
            prop_assert!(frame.min_y() >= 0.0);
            prop_assert!(frame.max_x() <= container.width + tolerance);
            prop_assert!(frame.max_y() <= container.height + tolerance);

            let image_ratio = image.height / image.width;
            let frame_ratio = frame.size.height / frame.size.width;
            prop_assert!((image_ratio - frame_ratio).abs() <= 1e-9 * image_ratio.max(1.0));
        }
    }
}
