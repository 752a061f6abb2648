use crate::codec::CodecError;
use crate::geometry::{Rect, Size2D};
use crate::state::StateError;
use thiserror::Error;

pub type CropResult<T> = std::result::Result<T, CropError>;

/// Why a crop request was rejected. The session keeps its prior state.
#[derive(Debug, Error)]
pub enum CropFailure {
    #[error("crop region has no area ({width}x{height} px)")]
    EmptyRegion { width: f64, height: f64 },
    #[error("crop region {rect:?} lies outside the {bounds:?} image")]
    OutOfBounds { rect: Rect, bounds: Size2D },
    #[error("codec rejected crop")]
    Codec(#[source] CodecError),
}

#[derive(Debug, Error)]
pub enum CropError {
    #[error("degenerate frame: container {container:?}, image {image:?}")]
    DegenerateFrame { container: Size2D, image: Size2D },
    #[error("crop failed: {0}")]
    Crop(#[from] CropFailure),
    #[error("rotate failed")]
    Rotate(#[source] CodecError),
    #[error(transparent)]
    State(#[from] StateError),
}
