use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use quadcrop::session::NoopRenderSink;
use quadcrop::{
    load_config, CropSession, HandleId, Point2D, RasterCodec, SessionEvent, Size2D,
};

/// Rotate and crop an image the way the interactive cropper would.
///
/// Rotations are applied first, then each drag moves one handle in
/// displayed-image points, then the crop is taken.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "quadcrop", about = "Handle-driven image crop and rotate")]
struct CliOptions {
    /// Image to read.
    input: PathBuf,

    /// Where to write the cropped image. The format follows the extension.
    output: PathBuf,

    /// Number of clockwise quarter turns before cropping.
    #[arg(long, default_value_t = 0, value_name = "N")]
    rotate: u32,

    /// Size of the view the image is laid out in.
    #[arg(long, default_value = "400x800", value_name = "WxH", value_parser = parse_size)]
    container: Size2D,

    /// Move one handle, e.g. `top-left:10,-4.5`. May be repeated.
    #[arg(long = "drag", value_name = "HANDLE:DX,DY", value_parser = parse_drag)]
    drags: Vec<(HandleId, Point2D)>,
}

impl CliOptions {
    fn events(&self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for _ in 0..self.rotate % 4 {
            events.push(SessionEvent::RotateRequested);
        }
        for (handle, delta) in &self.drags {
            events.push(SessionEvent::DragBegin(*handle));
            events.push(SessionEvent::DragChanged(*delta));
            events.push(SessionEvent::DragEnded);
        }
        events.push(SessionEvent::CropRequested);
        events
    }
}

fn parse_pair(value: &str, separator: char) -> Option<(f64, f64)> {
    let (first, second) = value.split_once(separator)?;
    let first = first.trim().parse::<f64>().ok()?;
    let second = second.trim().parse::<f64>().ok()?;
    (first.is_finite() && second.is_finite()).then_some((first, second))
}

fn parse_size(value: &str) -> Result<Size2D> {
    let (width, height) =
        parse_pair(value, 'x').with_context(|| format!("invalid container size {value:?}"))?;
    Ok(Size2D::new(width, height))
}

fn parse_drag(value: &str) -> Result<(HandleId, Point2D)> {
    let (handle, delta) = value
        .split_once(':')
        .with_context(|| format!("invalid drag {value:?}"))?;
    let handle = HandleId::parse(handle).with_context(|| format!("unknown handle {handle:?}"))?;
    let (dx, dy) = parse_pair(delta, ',').with_context(|| format!("invalid drag delta {delta:?}"))?;
    Ok((handle, Point2D::new(dx, dy)))
}

fn main() -> Result<()> {
    quadcrop::logging::init();
    let options = CliOptions::parse();
    let config = load_config();

    let image = RasterCodec::open(&options.input)
        .with_context(|| format!("failed to open {}", options.input.display()))?;
    tracing::info!(input = %options.input.display(), size = ?image.size(), "loaded image");

    let mut session = CropSession::new(
        RasterCodec,
        NoopRenderSink,
        image,
        options.container,
        config,
    );
    let failures = session.drive(&mut options.events().into_iter());
    if let Some(failure) = failures.first() {
        for failure in &failures {
            tracing::warn!(event = ?failure.event, error = %failure.error, "event rejected");
        }
        return Err(anyhow!("{}", failure.error)
            .context(format!("could not apply {:?}", failure.event)));
    }

    let cropped = session.into_image();
    RasterCodec::save(cropped.image(), &options.output)
        .with_context(|| format!("failed to write {}", options.output.display()))?;
    tracing::info!(output = %options.output.display(), size = ?cropped.size(), "saved cropped image");
    Ok(())
}
