use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    query,
    utils::{ApiBackend, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType},
};

use crate::{rgba, types::Frame};

// Prefer pixel formats that are widely supported; built-in cameras often
// reject YUYV even though the backend reports it.
const PREFERRED_PIXEL_FORMATS: &[FrameFormat] = &[
    FrameFormat::RAWRGB,
    FrameFormat::RAWBGR,
    FrameFormat::GRAY,
    FrameFormat::YUYV,
    FrameFormat::NV12,
    FrameFormat::MJPEG,
];

fn requested_formats() -> [RequestedFormat<'static>; 4] {
    [
        RequestedFormat::with_formats(
            RequestedFormatType::AbsoluteHighestFrameRate,
            PREFERRED_PIXEL_FORMATS,
        ),
        RequestedFormat::with_formats(
            RequestedFormatType::AbsoluteHighestResolution,
            PREFERRED_PIXEL_FORMATS,
        ),
        // Fall back to any format the backend can decode, preferring higher
        // FPS over very low default rates some drivers report.
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::None),
    ]
}

/// A camera opened for blocking, single-threaded capture.
pub struct Capture {
    camera: Camera,
}

impl Capture {
    /// Open the first camera the backend reports.
    pub fn open_first() -> Result<Self> {
        let devices = query(ApiBackend::Auto).context("failed to enumerate cameras")?;
        let info = devices
            .first()
            .ok_or_else(|| anyhow!("no camera available"))?;
        log::info!("using camera: {}", info.human_name());

        let camera = build_camera(info.index().clone())?;
        Ok(Capture { camera })
    }

    /// Block until the next frame arrives and convert it to RGBA.
    ///
    /// An error here is treated by the caller as end-of-stream.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let buffer = self.camera.frame().context("camera frame read failed")?;
        let pixels =
            rgba::convert_camera_frame(&buffer).context("failed to decode camera frame")?;

        Ok(Frame {
            rgba: pixels.rgba,
            width: pixels.width,
            height: pixels.height,
            timestamp: Instant::now(),
        })
    }
}

fn build_camera(index: CameraIndex) -> Result<Camera> {
    let mut last_err = None;

    for requested in requested_formats() {
        match Camera::new(index.clone(), requested) {
            Ok(mut camera) => match camera.open_stream() {
                Ok(()) => return Ok(camera),
                Err(err) => last_err = Some(err.into()),
            },
            Err(err) => last_err = Some(err.into()),
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow!("failed to open camera with any supported format")))
}
