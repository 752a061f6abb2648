mod event;
mod render;

use std::f64::consts::FRAC_PI_2;

use crate::codec::{EditableImage, ImageCodec};
use crate::config::CropperConfig;
use crate::cropper::{self, CropQuadrilateral, HandleId};
use crate::error::{CropError, CropFailure, CropResult};
use crate::geometry::{Point2D, Rect, Size2D};
use crate::state::{SessionOperation, SessionState, StateError, StateEvent, StateMachine};

pub use event::{EventFailure, EventSource, SessionEvent};
pub use render::{NoopRenderSink, RenderFrame, RenderSink};

pub struct CropSession<C: ImageCodec, R: RenderSink> {
    codec: C,
    sink: R,
    config: CropperConfig,
    machine: StateMachine,
    image: EditableImage<C::Image>,
    container: Size2D,
    frame: Option<Rect>,
    handles: CropQuadrilateral,
}

impl<C: ImageCodec, R: RenderSink> CropSession<C, R> {
    /// Lays the image out in `container` and places the default handles.
    ///
    /// A degenerate image or container leaves the session without a frame;
    /// geometry operations then fail with [`CropError::DegenerateFrame`] until
    /// a usable container size arrives.
    pub fn new(
        codec: C,
        sink: R,
        image: EditableImage<C::Image>,
        container: Size2D,
        config: CropperConfig,
    ) -> Self {
        let mut session = Self {
            codec,
            sink,
            config: config.sanitized(),
            machine: StateMachine::new(),
            image,
            container,
            frame: None,
            handles: CropQuadrilateral::new(Point2D::ZERO, Point2D::ZERO, Point2D::ZERO, Point2D::ZERO),
        };
        match cropper::aspect_fit_frame(session.image.size(), container) {
            Some(frame) => {
                session.reset_handles(frame);
                session.emit();
            }
            None => {
                tracing::warn!(
                    container = ?container,
                    image = ?session.image.size(),
                    "session created with degenerate frame"
                );
            }
        }
        session
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn handles(&self) -> &CropQuadrilateral {
        &self.handles
    }

    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn container(&self) -> Size2D {
        self.container
    }

    pub fn image(&self) -> &EditableImage<C::Image> {
        &self.image
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn into_image(self) -> EditableImage<C::Image> {
        self.image
    }

    /// Current render instructions, if the session has a frame.
    pub fn render_frame(&self) -> Option<RenderFrame> {
        self.frame.map(|frame| RenderFrame {
            quadrilateral: self.handles,
            mask: frame,
            outline: self.config.outline.clone(),
            mask_opacity: self.config.mask_opacity,
        })
    }

    /// Handle under `point`, using the configured hit area.
    pub fn handle_at(&self, point: Point2D) -> Option<HandleId> {
        self.frame?;
        self.handles.handle_at(point, self.config.handle_hit_size)
    }

    /// Re-lays out the image for a new container size and resets the handles.
    pub fn resize_container(&mut self, container: Size2D) -> CropResult<()> {
        let frame = cropper::aspect_fit_frame(self.image.size(), container).ok_or_else(|| {
            tracing::warn!(container = ?container, "ignoring resize to degenerate container");
            CropError::DegenerateFrame {
                container,
                image: self.image.size(),
            }
        })?;
        self.container = container;
        self.reset_handles(frame);
        tracing::debug!(container = ?container, frame = ?frame, "container resized");
        self.emit();
        Ok(())
    }

    pub fn begin_drag(&mut self, handle: HandleId) -> CropResult<()> {
        self.require_frame()?;
        self.machine.transition(StateEvent::BeginDrag(handle))?;
        tracing::debug!(handle = ?handle, "drag began");
        Ok(())
    }

    /// Moves the dragged handle by `delta`, clamped, and returns its new center.
    pub fn update_drag(&mut self, delta: Point2D) -> CropResult<Point2D> {
        let state = self.machine.state();
        let handle = state.dragging_handle().ok_or_else(|| {
            tracing::warn!(state = ?state, "drag update without an active drag");
            StateError::NoActiveDrag { state }
        })?;
        let frame = self.require_frame()?;
        if !delta.is_finite() {
            tracing::warn!(?delta, handle = ?handle, "ignoring non-finite drag delta");
            return Ok(self.handles.get(handle));
        }

        let center = cropper::constrain_handle(handle, &self.handles, delta, frame);
        self.handles.set(handle, center);
        self.emit();
        Ok(center)
    }

    pub fn end_drag(&mut self) -> CropResult<()> {
        self.machine.transition(StateEvent::EndDrag)?;
        tracing::debug!(handles = ?self.handles, "drag ended");
        Ok(())
    }

    /// Turns the image 90° clockwise and carries the handles along.
    pub fn rotate(&mut self) -> CropResult<()> {
        let previous = self.require_frame()?;
        self.run_locked(SessionOperation::Rotate, |session| {
            let rotated = session
                .codec
                .rotate(session.image.image(), FRAC_PI_2)
                .map_err(|err| {
                    tracing::warn!(?err, "could not rotate image");
                    CropError::Rotate(err)
                })?;
            let frame = session.layout_for(rotated.size())?;

            let ratio = cropper::quarter_turn_resize_ratio(previous.size, frame.size);
            session.handles =
                cropper::remap_for_quarter_turn(&session.handles, previous.center(), ratio);
            session.image = rotated;
            session.frame = Some(frame);
            tracing::debug!(image = ?session.image.size(), frame = ?frame, "image rotated");
            Ok(())
        })?;
        self.emit();
        Ok(())
    }

    /// Crops the image to the handle rectangle and resets the handles.
    pub fn crop(&mut self) -> CropResult<()> {
        let frame = self.require_frame()?;
        self.run_locked(SessionOperation::Crop, |session| {
            let pixel_rect = cropper::pixel_crop_rect(&session.handles, frame, session.image.size())
                .map_err(|failure| {
                    tracing::warn!(%failure, "could not compute crop region");
                    CropError::from(failure)
                })?;
            let cropped = session
                .codec
                .crop(session.image.image(), pixel_rect)
                .map_err(|err| {
                    tracing::warn!(?err, ?pixel_rect, "codec rejected crop");
                    CropError::from(CropFailure::Codec(err))
                })?;
            let next_frame = session.layout_for(cropped.size())?;

            session.image = cropped;
            session.reset_handles(next_frame);
            tracing::debug!(pixel_rect = ?pixel_rect, image = ?session.image.size(), "image cropped");
            Ok(())
        })?;
        self.emit();
        Ok(())
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> CropResult<()> {
        match event {
            SessionEvent::DragBegin(handle) => self.begin_drag(handle),
            SessionEvent::DragChanged(delta) => self.update_drag(delta).map(|_| ()),
            SessionEvent::DragEnded => self.end_drag(),
            SessionEvent::RotateRequested => self.rotate(),
            SessionEvent::CropRequested => self.crop(),
            SessionEvent::ContainerResized(size) => self.resize_container(size),
        }
    }

    /// Feeds every event from `source` to the session, in order, and returns
    /// the ones that failed.
    pub fn drive<S: EventSource + ?Sized>(&mut self, source: &mut S) -> Vec<EventFailure> {
        let mut failures = Vec::new();
        while let Some(event) = source.next_event() {
            if let Err(error) = self.handle_event(event) {
                failures.push(EventFailure { event, error });
            }
        }
        failures
    }

    fn require_frame(&self) -> CropResult<Rect> {
        self.frame.ok_or_else(|| {
            tracing::warn!(
                container = ?self.container,
                image = ?self.image.size(),
                "geometry operation skipped: no displayed frame"
            );
            CropError::DegenerateFrame {
                container: self.container,
                image: self.image.size(),
            }
        })
    }

    fn layout_for(&self, image_size: Size2D) -> CropResult<Rect> {
        cropper::aspect_fit_frame(image_size, self.container).ok_or(CropError::DegenerateFrame {
            container: self.container,
            image: image_size,
        })
    }

    fn reset_handles(&mut self, frame: Rect) {
        let inset = self.container.width * self.config.default_inset_ratio;
        self.frame = Some(frame);
        self.handles = CropQuadrilateral::inset_from(frame, inset);
    }

    /// Runs `work` with drags and other codec operations locked out. The
    /// session is back in `Idle` afterwards whether or not `work` succeeded.
    fn run_locked<T>(
        &mut self,
        operation: SessionOperation,
        work: impl FnOnce(&mut Self) -> CropResult<T>,
    ) -> CropResult<T> {
        self.machine
            .transition(StateEvent::BeginProcessing(operation))?;
        let result = work(self);
        self.machine.transition(StateEvent::FinishProcessing)?;
        result
    }

    fn emit(&mut self) {
        if let Some(frame) = self.render_frame() {
            self.sink.consume(&frame);
        }
    }
}
