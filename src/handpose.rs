//! The pretrained hand landmark detector, consumed as a black box.
//!
//! Letterboxes the frame into the model's square input, runs the ONNX
//! session and projects the 21 landmarks back into frame pixels.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::{RgbaImage, imageops::FilterType};
use ndarray::Array4;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;

use crate::types::{Frame, HandPose, Pointer};

pub const INPUT_SIZE: u32 = 224;
pub const NUM_LANDMARKS: usize = 21;

/// Detections below this confidence count as "no hand this frame".
pub const MIN_CONFIDENCE: f32 = 0.2;

const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;

struct Letterbox {
    scale: f32,
    pad_x: f32,
    pad_y: f32,
    orig_w: u32,
    orig_h: u32,
}

pub struct HandposeEngine {
    session: Session,
}

impl HandposeEngine {
    pub fn new(model_path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(model_path)
            .with_context(|| {
                format!("failed to load ORT session from {}", model_path.display())
            })?;

        Ok(Self { session })
    }

    /// Run one frame through the model. `None` means no confident detection.
    pub fn detect(&mut self, frame: &Frame) -> Result<Option<HandPose>> {
        let (input, letterbox) = prepare_input(frame)?;
        let tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .context("failed to run ORT session")?;

        if outputs.len() < 1 {
            return Err(anyhow!("model returned no outputs"));
        }

        let coords = outputs[0].try_extract_array::<f32>()?;
        let flattened: Vec<f32> = coords.iter().copied().collect();
        let raw = decode_landmarks(&flattened)?;

        let confidence = if outputs.len() > 1 {
            outputs[1]
                .try_extract_array::<f32>()
                .ok()
                .and_then(|arr| arr.iter().next().copied())
                .unwrap_or(0.0)
                .clamp(0.0, 1.0)
        } else {
            0.0
        };

        if confidence < MIN_CONFIDENCE {
            return Ok(None);
        }

        Ok(Some(HandPose {
            landmarks: project_landmarks(&raw, &letterbox),
            confidence,
        }))
    }
}

/// Midpoint of thumb tip and index tip, the dial's control point.
pub fn pointer_from_pose(pose: &HandPose) -> Option<Pointer> {
    let &thumb = pose.landmarks.get(THUMB_TIP)?;
    let &index = pose.landmarks.get(INDEX_TIP)?;
    Some(Pointer {
        thumb,
        index,
        mid: ((thumb.0 + index.0) / 2.0, (thumb.1 + index.1) / 2.0),
    })
}

fn prepare_input(frame: &Frame) -> Result<(Array4<f32>, Letterbox)> {
    let Some(img) = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()) else {
        return Err(anyhow!("failed to build RGBA image from frame"));
    };

    let scale = INPUT_SIZE as f32 / (frame.width.max(frame.height) as f32);
    let new_w = (frame.width as f32 * scale).round().max(1.0) as u32;
    let new_h = (frame.height as f32 * scale).round().max(1.0) as u32;
    let resized = image::imageops::resize(&img, new_w, new_h, FilterType::CatmullRom);

    let pad_x = ((INPUT_SIZE as i64 - new_w as i64) / 2).max(0) as f32;
    let pad_y = ((INPUT_SIZE as i64 - new_h as i64) / 2).max(0) as f32;
    let mut canvas =
        RgbaImage::from_pixel(INPUT_SIZE, INPUT_SIZE, image::Rgba([0u8, 0u8, 0u8, 255u8]));
    for y in 0..new_h {
        for x in 0..new_w {
            let px = *resized.get_pixel(x, y);
            let lx = (x as f32 + pad_x).round() as u32;
            let ly = (y as f32 + pad_y).round() as u32;
            if lx < canvas.width() && ly < canvas.height() {
                canvas.put_pixel(lx, ly, px);
            }
        }
    }

    let mut input = Array4::<f32>::zeros((1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3));
    for y in 0..INPUT_SIZE {
        for x in 0..INPUT_SIZE {
            let pixel = canvas.get_pixel(x, y).0;
            input[[0, y as usize, x as usize, 0]] = pixel[0] as f32 / 255.0;
            input[[0, y as usize, x as usize, 1]] = pixel[1] as f32 / 255.0;
            input[[0, y as usize, x as usize, 2]] = pixel[2] as f32 / 255.0;
        }
    }

    let letterbox = Letterbox {
        scale,
        pad_x,
        pad_y,
        orig_w: frame.width,
        orig_h: frame.height,
    };

    Ok((input, letterbox))
}

fn decode_landmarks(flat: &[f32]) -> Result<Vec<[f32; 3]>> {
    if flat.len() < NUM_LANDMARKS * 3 {
        return Err(anyhow!(
            "unexpected landmarks length: got {}, need {}",
            flat.len(),
            NUM_LANDMARKS * 3
        ));
    }

    let mut landmarks = Vec::with_capacity(NUM_LANDMARKS);
    for chunk in flat.chunks_exact(3).take(NUM_LANDMARKS) {
        landmarks.push([chunk[0], chunk[1], chunk[2]]);
    }
    Ok(landmarks)
}

fn project_landmarks(landmarks: &[[f32; 3]], letterbox: &Letterbox) -> Vec<(f32, f32)> {
    landmarks
        .iter()
        .map(|[x, y, _z]| {
            let px = (x - letterbox.pad_x) / letterbox.scale;
            let py = (y - letterbox.pad_y) / letterbox.scale;
            let cx = px.clamp(0.0, (letterbox.orig_w.saturating_sub(1)) as f32);
            let cy = py.clamp(0.0, (letterbox.orig_h.saturating_sub(1)) as f32);
            (cx, cy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_short_output() {
        assert!(decode_landmarks(&[0.0; 10]).is_err());
    }

    #[test]
    fn decode_takes_first_21_triples() {
        let flat: Vec<f32> = (0..NUM_LANDMARKS * 3 + 6).map(|i| i as f32).collect();
        let landmarks = decode_landmarks(&flat).unwrap();
        assert_eq!(landmarks.len(), NUM_LANDMARKS);
        assert_eq!(landmarks[0], [0.0, 1.0, 2.0]);
        assert_eq!(landmarks[20], [60.0, 61.0, 62.0]);
    }

    #[test]
    fn projection_undoes_letterbox_and_clamps() {
        let letterbox = Letterbox {
            scale: 0.5,
            pad_x: 12.0,
            pad_y: 0.0,
            orig_w: 400,
            orig_h: 448,
        };
        let projected = project_landmarks(&[[112.0, 112.0, 0.0], [-50.0, 999.0, 0.0]], &letterbox);
        assert_eq!(projected[0], (200.0, 224.0));
        // Off-canvas points clamp to frame bounds instead of escaping.
        assert_eq!(projected[1], (0.0, 447.0));
    }

    #[test]
    fn pointer_is_fingertip_midpoint() {
        let mut landmarks = vec![(0.0, 0.0); NUM_LANDMARKS];
        landmarks[THUMB_TIP] = (100.0, 200.0);
        landmarks[INDEX_TIP] = (300.0, 100.0);
        let pose = HandPose {
            landmarks,
            confidence: 0.9,
        };
        let pointer = pointer_from_pose(&pose).unwrap();
        assert_eq!(pointer.mid, (200.0, 150.0));
    }

    #[test]
    fn pointer_missing_when_landmarks_truncated() {
        let pose = HandPose {
            landmarks: vec![(0.0, 0.0); 5],
            confidence: 0.9,
        };
        assert!(pointer_from_pose(&pose).is_none());
    }
}
