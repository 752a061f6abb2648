pub mod codec;
pub mod config;
pub mod cropper;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod session;
pub mod state;

pub use codec::{EditableImage, ImageCodec, RasterCodec};
pub use config::{load_config, CropperConfig};
pub use cropper::{CropQuadrilateral, HandleId};
pub use error::{CropError, CropFailure, CropResult};
pub use geometry::{Point2D, Rect, Size2D};
pub use session::{CropSession, EventSource, RenderFrame, RenderSink, SessionEvent};
