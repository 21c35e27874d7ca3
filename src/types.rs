use std::time::Instant;

/// One captured video frame, tightly packed RGBA.
#[derive(Clone, Debug)]
pub struct Frame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    #[allow(dead_code)]
    pub timestamp: Instant,
}

impl Frame {
    /// Mirror the frame in place so the preview behaves like a selfie view.
    pub fn mirror_horizontal(&mut self) {
        let w = self.width as usize;
        for row in self.rgba.chunks_exact_mut(w * 4) {
            for x in 0..w / 2 {
                let left = x * 4;
                let right = (w - 1 - x) * 4;
                for byte in 0..4 {
                    row.swap(left + byte, right + byte);
                }
            }
        }
    }
}

/// Landmarks for one detected hand, projected into frame pixels.
#[derive(Clone, Debug)]
pub struct HandPose {
    pub landmarks: Vec<(f32, f32)>,
    pub confidence: f32,
}

/// The control point derived from a detected hand: thumb tip, index tip,
/// and the midpoint between them that drives the aura weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub thumb: (f32, f32),
    pub index: (f32, f32),
    pub mid: (f32, f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Frame {
        Frame {
            rgba: pixels.iter().flatten().copied().collect(),
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    #[test]
    fn mirror_reverses_each_row() {
        let mut frame = frame_from_pixels(
            3,
            2,
            &[
                [1, 1, 1, 255],
                [2, 2, 2, 255],
                [3, 3, 3, 255],
                [4, 4, 4, 255],
                [5, 5, 5, 255],
                [6, 6, 6, 255],
            ],
        );
        frame.mirror_horizontal();
        assert_eq!(&frame.rgba[0..4], &[3, 3, 3, 255]);
        assert_eq!(&frame.rgba[4..8], &[2, 2, 2, 255]);
        assert_eq!(&frame.rgba[8..12], &[1, 1, 1, 255]);
        assert_eq!(&frame.rgba[12..16], &[6, 6, 6, 255]);
    }

    #[test]
    fn mirror_twice_is_identity() {
        let mut frame = frame_from_pixels(2, 1, &[[10, 20, 30, 255], [40, 50, 60, 255]]);
        let original = frame.rgba.clone();
        frame.mirror_horizontal();
        frame.mirror_horizontal();
        assert_eq!(frame.rgba, original);
    }
}
