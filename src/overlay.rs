//! Pixel-level drawing on an RGBA frame. Everything here clips at the
//! frame bounds; out-of-range coordinates are silently skipped.

/// Source-over blend of `color` onto the pixel at (x, y). The color's
/// alpha channel controls coverage; the destination stays opaque.
pub fn blend_pixel(buffer: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= width || uy >= height {
        return;
    }
    let idx = ((uy * width + ux) as usize) * 4;
    if idx + 3 >= buffer.len() {
        return;
    }

    let alpha = color[3] as u32;
    if alpha == 255 {
        buffer[idx..idx + 3].copy_from_slice(&color[..3]);
    } else {
        for channel in 0..3 {
            let src = color[channel] as u32;
            let dst = buffer[idx + channel] as u32;
            buffer[idx + channel] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
        }
    }
    buffer[idx + 3] = 255;
}

/// Filled circle; translucent colors give the soft aura discs.
pub fn fill_circle(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    center: (i32, i32),
    radius: i32,
    color: [u8; 4],
) {
    let (cx, cy) = center;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                blend_pixel(buffer, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Axis-aligned filled rectangle, blended (the panel background).
pub fn fill_rect(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_w: i32,
    rect_h: i32,
    color: [u8; 4],
) {
    for py in y..y + rect_h {
        for px in x..x + rect_w {
            blend_pixel(buffer, width, height, px, py, color);
        }
    }
}

/// Thick Bresenham line between two points.
pub fn draw_line(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    p0: (f32, f32),
    p1: (f32, f32),
    color: [u8; 4],
    thickness: i32,
) {
    let (mut x0, mut y0) = (p0.0 as i32, p0.1 as i32);
    let (x1, y1) = (p1.0 as i32, p1.1 as i32);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let radius = (thickness.max(1) - 1) / 2;

    loop {
        blend_pixel(buffer, width, height, x0, y0, color);
        if radius > 0 {
            for ox in -radius..=radius {
                for oy in -radius..=radius {
                    if ox == 0 && oy == 0 {
                        continue;
                    }
                    if ox.abs() + oy.abs() <= radius {
                        blend_pixel(buffer, width, height, x0 + ox, y0 + oy, color);
                    }
                }
            }
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = vec![0u8; (width * height * 4) as usize];
        for px in buffer.chunks_exact_mut(4) {
            px[3] = 255;
        }
        buffer
    }

    fn pixel(buffer: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) as usize) * 4;
        [buffer[idx], buffer[idx + 1], buffer[idx + 2], buffer[idx + 3]]
    }

    #[test]
    fn opaque_blend_overwrites() {
        let mut buffer = blank(2, 2);
        blend_pixel(&mut buffer, 2, 2, 1, 1, [10, 20, 30, 255]);
        assert_eq!(pixel(&buffer, 2, 1, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn half_alpha_mixes_with_destination() {
        let mut buffer = blank(1, 1);
        buffer[0] = 200;
        blend_pixel(&mut buffer, 1, 1, 0, 0, [0, 0, 0, 128]);
        // 200 * (127/255) ≈ 99
        let value = pixel(&buffer, 1, 0, 0)[0];
        assert!((98..=100).contains(&value), "got {value}");
    }

    #[test]
    fn out_of_bounds_writes_are_clipped() {
        let mut buffer = blank(4, 4);
        let before = buffer.clone();
        blend_pixel(&mut buffer, 4, 4, -1, 0, [255, 255, 255, 255]);
        blend_pixel(&mut buffer, 4, 4, 4, 0, [255, 255, 255, 255]);
        blend_pixel(&mut buffer, 4, 4, 0, 4, [255, 255, 255, 255]);
        fill_circle(&mut buffer, 4, 4, (-10, -10), 3, [255, 255, 255, 255]);
        fill_rect(&mut buffer, 4, 4, 2, 2, 100, 100, [0, 0, 0, 0]);
        assert_eq!(buffer, before);
    }

    #[test]
    fn line_paints_both_endpoints() {
        let mut buffer = blank(8, 8);
        draw_line(&mut buffer, 8, 8, (1.0, 1.0), (6.0, 6.0), [255, 0, 0, 255], 1);
        assert_eq!(pixel(&buffer, 8, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 8, 6, 6), [255, 0, 0, 255]);
    }

    #[test]
    fn circle_covers_center_and_respects_radius() {
        let mut buffer = blank(9, 9);
        fill_circle(&mut buffer, 9, 9, (4, 4), 2, [0, 255, 0, 255]);
        assert_eq!(pixel(&buffer, 9, 4, 4), [0, 255, 0, 255]);
        assert_eq!(pixel(&buffer, 9, 4, 2), [0, 255, 0, 255]);
        // Corner of the bounding box stays untouched.
        assert_eq!(pixel(&buffer, 9, 2, 2)[1], 0);
    }
}
