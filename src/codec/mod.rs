//! Pixel operations the session delegates to: crop and rotate.

use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use image::{DynamicImage, GenericImageView};
use thiserror::Error;

use crate::geometry::{Rect, Size2D};

const QUARTER_TURN_TOLERANCE: f64 = 1e-6;

pub type CodecResult<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("rotation by {radians} rad is not a multiple of a quarter turn")]
    UnsupportedAngle { radians: f64 },
    #[error("crop region is empty after rounding to whole pixels")]
    EmptyRegion,
    #[error("crop region {x},{y} {width}x{height} exceeds {image_width}x{image_height} image")]
    RegionOutOfBounds {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        image_width: u32,
        image_height: u32,
    },
    #[error("image codec error")]
    Image(#[from] image::ImageError),
}

/// An image together with its pixel size. Replaced whole, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableImage<I> {
    image: I,
    size: Size2D,
}

impl<I> EditableImage<I> {
    pub fn new(image: I, size: Size2D) -> Self {
        Self { image, size }
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn size(&self) -> Size2D {
        self.size
    }
}

pub trait ImageCodec {
    type Image;

    fn crop(
        &self,
        image: &Self::Image,
        pixel_rect: Rect,
    ) -> CodecResult<EditableImage<Self::Image>>;

    /// Positive angles turn clockwise on screen.
    fn rotate(&self, image: &Self::Image, radians: f64) -> CodecResult<EditableImage<Self::Image>>;
}

/// Number of clockwise quarter turns in `radians`, normalized to `0..4`.
pub fn quarter_turns(radians: f64) -> Option<u8> {
    let turns = radians / FRAC_PI_2;
    let whole = turns.round();
    if !turns.is_finite() || (turns - whole).abs() > QUARTER_TURN_TOLERANCE {
        return None;
    }
    u8::try_from((whole as i64).rem_euclid(4)).ok()
}

/// [`ImageCodec`] over in-memory raster images from the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec;

impl RasterCodec {
    pub fn open(path: impl AsRef<Path>) -> CodecResult<EditableImage<DynamicImage>> {
        let image = image::open(path)?;
        Ok(Self::wrap(image))
    }

    pub fn save(image: &DynamicImage, path: impl AsRef<Path>) -> CodecResult<()> {
        image.save(path)?;
        Ok(())
    }

    pub fn wrap(image: DynamicImage) -> EditableImage<DynamicImage> {
        let (width, height) = image.dimensions();
        EditableImage::new(image, Size2D::new(f64::from(width), f64::from(height)))
    }
}

impl ImageCodec for RasterCodec {
    type Image = DynamicImage;

    fn crop(
        &self,
        image: &DynamicImage,
        pixel_rect: Rect,
    ) -> CodecResult<EditableImage<DynamicImage>> {
        let (image_width, image_height) = image.dimensions();
        let left = pixel_rect.min_x().round() as i64;
        let top = pixel_rect.min_y().round() as i64;
        let right = pixel_rect.max_x().round() as i64;
        let bottom = pixel_rect.max_y().round() as i64;

        if right <= left || bottom <= top {
            return Err(CodecError::EmptyRegion);
        }
        if left < 0
            || top < 0
            || right > i64::from(image_width)
            || bottom > i64::from(image_height)
        {
            return Err(CodecError::RegionOutOfBounds {
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
                image_width,
                image_height,
            });
        }

        // Bounds were checked above, so every value fits in u32.
        let cropped = image.crop_imm(
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        );
        Ok(Self::wrap(cropped))
    }

    fn rotate(&self, image: &DynamicImage, radians: f64) -> CodecResult<EditableImage<DynamicImage>> {
        let rotated = match quarter_turns(radians) {
            Some(0) => image.clone(),
            Some(1) => image.rotate90(),
            Some(2) => image.rotate180(),
            Some(3) => image.rotate270(),
            _ => return Err(CodecError::UnsupportedAngle { radians }),
        };
        Ok(Self::wrap(rotated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::f64::consts::PI;

    /// 4x2 image whose red channel encodes `x + 10 * y`.
    fn test_image() -> DynamicImage {
        let mut image = RgbaImage::new(4, 2);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = Rgba([(x + 10 * y) as u8, 0, 0, 255]);
        }
        DynamicImage::ImageRgba8(image)
    }

    fn red_at(image: &DynamicImage, x: u32, y: u32) -> u8 {
        image.get_pixel(x, y).0[0]
    }

    #[test]
    fn quarter_turns_normalizes_multiples_of_half_pi() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(FRAC_PI_2), Some(1));
        assert_eq!(quarter_turns(PI), Some(2));
        assert_eq!(quarter_turns(-FRAC_PI_2), Some(3));
        assert_eq!(quarter_turns(5.0 * FRAC_PI_2), Some(1));
        assert_eq!(quarter_turns(0.3), None);
        assert_eq!(quarter_turns(f64::NAN), None);
    }

    #[test]
    fn crop_returns_region_and_size() {
        let cropped = RasterCodec
            .crop(&test_image(), Rect::new(1.0, 0.0, 2.0, 2.0))
            .expect("crop should succeed");
        assert_eq!(cropped.size(), Size2D::new(2.0, 2.0));
        assert_eq!(red_at(cropped.image(), 0, 0), 1);
        assert_eq!(red_at(cropped.image(), 1, 1), 12);
    }

    #[test]
    fn crop_rounds_fractional_edges() {
        let cropped = RasterCodec
            .crop(&test_image(), Rect::new(0.6, 0.2, 2.7, 1.6))
            .expect("crop should succeed");
        // x: 1..3, y: 0..2
        assert_eq!(cropped.size(), Size2D::new(2.0, 2.0));
        assert_eq!(red_at(cropped.image(), 0, 0), 1);
    }

    #[test]
    fn crop_rejects_empty_and_out_of_bounds_regions() {
        let image = test_image();
        assert!(matches!(
            RasterCodec.crop(&image, Rect::new(1.0, 0.0, 0.2, 2.0)),
            Err(CodecError::EmptyRegion)
        ));
        assert!(matches!(
            RasterCodec.crop(&image, Rect::new(2.0, 0.0, 4.0, 2.0)),
            Err(CodecError::RegionOutOfBounds { image_width: 4, .. })
        ));
    }

    #[test]
    fn rotate_quarter_turn_is_clockwise_and_swaps_size() {
        let rotated = RasterCodec
            .rotate(&test_image(), FRAC_PI_2)
            .expect("rotate should succeed");
        assert_eq!(rotated.size(), Size2D::new(2.0, 4.0));
        // Clockwise: the bottom-left source pixel lands top-left.
        assert_eq!(red_at(rotated.image(), 0, 0), 10);
        assert_eq!(red_at(rotated.image(), 1, 0), 0);
    }

    #[test]
    fn rotate_rejects_arbitrary_angles() {
        assert!(matches!(
            RasterCodec.rotate(&test_image(), 0.5),
            Err(CodecError::UnsupportedAngle { .. })
        ));
    }
}
