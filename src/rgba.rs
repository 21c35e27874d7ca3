//! Conversion of native camera pixel formats into tightly packed RGBA.

use rayon::prelude::*;
use thiserror::Error;
use yuv::{
    YuvBiPlanarImage, YuvConversionMode, YuvPackedImage, YuvRange, YuvStandardMatrix,
    yuv_nv12_to_rgba, yuyv422_to_rgba,
};
use zune_jpeg::{
    JpegDecoder,
    zune_core::{bytestream::ZCursor, colorspace::ColorSpace, options::DecoderOptions},
};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{format} buffer too small: got {got} bytes, expected {expected}")]
    BufferTooSmall {
        format: &'static str,
        got: usize,
        expected: usize,
    },
    #[error("{format} decode failed: {reason}")]
    Decode {
        format: &'static str,
        reason: String,
    },
}

#[derive(Debug)]
pub struct RgbaPixels {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[cfg(feature = "camera-nokhwa")]
pub fn convert_camera_frame(
    buffer: &nokhwa::Buffer,
) -> Result<RgbaPixels, ConvertError> {
    use nokhwa::utils::FrameFormat;

    let resolution = buffer.resolution();
    let width = resolution.width_x;
    let height = resolution.height_y;
    let data = buffer.buffer();

    let rgba = match buffer.source_frame_format() {
        FrameFormat::NV12 => nv12_to_rgba(data, width, height)?,
        FrameFormat::YUYV => yuyv_to_rgba(data, width, height)?,
        FrameFormat::MJPEG => mjpeg_to_rgba(data)?,
        FrameFormat::RAWRGB => rgb_like_to_rgba(data, width, height, false)?,
        FrameFormat::RAWBGR => rgb_like_to_rgba(data, width, height, true)?,
        FrameFormat::GRAY => gray_to_rgba(data, width, height)?,
    };

    Ok(RgbaPixels {
        rgba,
        width,
        height,
    })
}

fn check_len(format: &'static str, got: usize, expected: usize) -> Result<(), ConvertError> {
    if got < expected {
        return Err(ConvertError::BufferTooSmall {
            format,
            got,
            expected,
        });
    }
    Ok(())
}

fn nv12_to_rgba(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ConvertError> {
    let y_len = width as usize * height as usize;
    let uv_len = y_len / 2;
    check_len("NV12", data.len(), y_len + uv_len)?;

    let mut rgba = vec![0u8; y_len * 4];
    let image = YuvBiPlanarImage {
        y_plane: &data[..y_len],
        y_stride: width,
        uv_plane: &data[y_len..y_len + uv_len],
        uv_stride: width,
        width,
        height,
    };

    yuv_nv12_to_rgba(
        &image,
        &mut rgba,
        width * 4,
        YuvRange::Full,
        YuvStandardMatrix::Bt709,
        YuvConversionMode::Balanced,
    )
    .map_err(|err| ConvertError::Decode {
        format: "NV12",
        reason: format!("{err:?}"),
    })?;

    Ok(rgba)
}

fn yuyv_to_rgba(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ConvertError> {
    let pixels = width as usize * height as usize;
    check_len("YUYV", data.len(), pixels * 2)?;

    let mut rgba = vec![0u8; pixels * 4];
    let packed = YuvPackedImage {
        yuy: data,
        yuy_stride: width * 2,
        width,
        height,
    };

    yuyv422_to_rgba(
        &packed,
        &mut rgba,
        width * 4,
        YuvRange::Full,
        YuvStandardMatrix::Bt709,
    )
    .map_err(|err| ConvertError::Decode {
        format: "YUYV",
        reason: format!("{err:?}"),
    })?;

    Ok(rgba)
}

fn mjpeg_to_rgba(data: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::RGBA);
    let mut decoder = JpegDecoder::new_with_options(ZCursor::new(data), options);
    let rgba = decoder.decode().map_err(|err| ConvertError::Decode {
        format: "MJPEG",
        reason: format!("{err:?}"),
    })?;

    if let Some(info) = decoder.info() {
        let expected = info.width as usize * info.height as usize * 4;
        check_len("MJPEG", rgba.len(), expected)?;
    }

    Ok(rgba)
}

fn rgb_like_to_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    swap_rb: bool,
) -> Result<Vec<u8>, ConvertError> {
    let pixels = width as usize * height as usize;
    let format = if swap_rb { "RAWBGR" } else { "RAWRGB" };
    check_len(format, data.len(), pixels * 3)?;

    let mut rgba = vec![0u8; pixels * 4];
    rgba.par_chunks_mut(4)
        .zip(data.par_chunks_exact(3))
        .for_each(|(dst, src)| {
            if swap_rb {
                dst[0] = src[2];
                dst[1] = src[1];
                dst[2] = src[0];
            } else {
                dst[..3].copy_from_slice(src);
            }
            dst[3] = 255;
        });

    Ok(rgba)
}

fn gray_to_rgba(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ConvertError> {
    let pixels = width as usize * height as usize;
    check_len("GRAY", data.len(), pixels)?;

    let mut rgba = vec![0u8; pixels * 4];
    rgba.par_chunks_mut(4)
        .zip(data.par_iter().copied())
        .for_each(|(dst, value)| {
            dst[0] = value;
            dst[1] = value;
            dst[2] = value;
            dst[3] = 255;
        });

    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_expands_to_opaque_rgba() {
        let rgba = gray_to_rgba(&[0, 128, 255], 3, 1).unwrap();
        assert_eq!(rgba, vec![0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn bgr_swaps_channels() {
        let rgba = rgb_like_to_rgba(&[10, 20, 30], 1, 1, true).unwrap();
        assert_eq!(rgba, vec![30, 20, 10, 255]);
    }

    #[test]
    fn rgb_keeps_channel_order() {
        let rgba = rgb_like_to_rgba(&[10, 20, 30], 1, 1, false).unwrap();
        assert_eq!(rgba, vec![10, 20, 30, 255]);
    }

    #[test]
    fn short_buffer_is_a_typed_error() {
        let err = gray_to_rgba(&[0u8; 3], 4, 1).unwrap_err();
        match err {
            ConvertError::BufferTooSmall { format, got, expected } => {
                assert_eq!(format, "GRAY");
                assert_eq!(got, 3);
                assert_eq!(expected, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
