//! Scene composition: auras, fingertip markers, the script panel and the
//! captions, all drawn straight onto the camera frame.

use crate::{
    aura::Tone,
    font, overlay,
    types::{Frame, Pointer},
};

// Values below 1.0 pull the layout tighter together.
const TIGHTEN: f32 = 0.8;

const TITLE: &str = "ai has auras, too";
const CAPTION: &str = "hand-tracked aura dial, same prompt, different voices";

const TITLE_SCALE: u32 = 4;
const BODY_SCALE: u32 = 2;

const PANEL_WIDTH_FRAC: f32 = 0.36;
const PANEL_TOP: i32 = 60;
const PANEL_PADDING: i32 = 12;
const PANEL_BG: [u8; 4] = [28, 28, 28, 166];

const AURA_ALPHAS: [u8; 3] = [46, 56, 77];
const AURA_RADII_FRAC: [f32; 3] = [0.08, 0.05, 0.03];

const MARKER_COLOR: [u8; 4] = [255, 255, 255, 255];
const MIDPOINT_COLOR: [u8; 4] = [230, 230, 230, 255];
const TEXT_COLOR: [u8; 4] = [240, 240, 240, 255];
const LABEL_COLOR: [u8; 4] = [230, 230, 230, 255];

/// Greedily wrap one paragraph so every line measures within `max_width`.
///
/// A single word wider than the bound is emitted on its own line (words are
/// never split). The empty string wraps to exactly one empty line.
pub fn wrap_to_width<F>(text: &str, max_width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let tentative = format!("{current} {word}");
        if measure(&tentative) <= max_width {
            current = tentative;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    lines.push(current);
    lines
}

/// Draw the full overlay for one frame.
pub fn draw_scene(frame: &mut Frame, pointer: Option<&Pointer>, dominant: Tone) {
    let (w, h) = (frame.width, frame.height);

    font::draw_text(
        &mut frame.rgba,
        w,
        h,
        18,
        14,
        TITLE,
        TITLE_SCALE,
        [255, 255, 255, 255],
    );

    draw_auras(frame);

    if let Some(pointer) = pointer {
        draw_pointer(frame, pointer);
    }

    draw_dominant_bracket(frame, dominant);
    draw_panel(frame, dominant);

    let caption_y = h as i32 - 36;
    font::draw_text(
        &mut frame.rgba,
        w,
        h,
        18,
        caption_y,
        CAPTION,
        BODY_SCALE,
        TEXT_COLOR,
    );
}

fn draw_auras(frame: &mut Frame) {
    let (w, h) = (frame.width, frame.height);
    for tone in Tone::ALL {
        let (cx, cy) = tone.anchor_px(w, h);
        let center = (cx as i32, cy as i32);
        let base = tone.color();

        // Three concentric translucent discs, darkest core last.
        for (frac, alpha) in AURA_RADII_FRAC.into_iter().zip(AURA_ALPHAS) {
            let radius = (frac * w as f32 * TIGHTEN) as i32;
            let color = [base[0], base[1], base[2], alpha];
            overlay::fill_circle(&mut frame.rgba, w, h, center, radius, color);
        }

        let label_offset = (10.0 * TIGHTEN) as i32;
        font::draw_text(
            &mut frame.rgba,
            w,
            h,
            center.0 - label_offset,
            center.1,
            tone.label(),
            BODY_SCALE,
            LABEL_COLOR,
        );
    }
}

fn draw_pointer(frame: &mut Frame, pointer: &Pointer) {
    let (w, h) = (frame.width, frame.height);
    let rgba = &mut frame.rgba;

    overlay::draw_line(rgba, w, h, pointer.index, pointer.thumb, MARKER_COLOR, 3);
    let index = (pointer.index.0 as i32, pointer.index.1 as i32);
    let thumb = (pointer.thumb.0 as i32, pointer.thumb.1 as i32);
    overlay::fill_circle(rgba, w, h, index, 10, MARKER_COLOR);
    overlay::fill_circle(rgba, w, h, thumb, 10, MARKER_COLOR);

    let mid = (pointer.mid.0 as i32, pointer.mid.1 as i32);
    overlay::fill_circle(rgba, w, h, mid, 6, MIDPOINT_COLOR);
}

fn draw_dominant_bracket(frame: &mut Frame, dominant: Tone) {
    let (w, h) = (frame.width, frame.height);
    let (cx, cy) = dominant.anchor_px(w, h);
    let x = cx as i32 - (18.0 * TIGHTEN) as i32;
    let y = cy as i32 - (20.0 * TIGHTEN) as i32;
    let label = format!("[{}]", dominant.label());
    font::draw_text(
        &mut frame.rgba,
        w,
        h,
        x,
        y,
        &label,
        BODY_SCALE,
        [245, 245, 245, 255],
    );
}

fn draw_panel(frame: &mut Frame, dominant: Tone) {
    let (w, h) = (frame.width, frame.height);

    let panel_w = (PANEL_WIDTH_FRAC * w as f32) as i32;
    let panel_x = w as i32 - panel_w - (12.0 * TIGHTEN) as i32;
    let max_text_w = (panel_w - 16).max(0) as u32;

    let mut lines = Vec::new();
    for paragraph in dominant.script().split('\n') {
        lines.extend(wrap_to_width(paragraph, max_text_w, |text| {
            font::text_width(text, BODY_SCALE)
        }));
    }

    let line_height = (20.0 * TIGHTEN) as i32;
    let panel_h = PANEL_PADDING * 2 + line_height * lines.len().max(1) as i32;
    overlay::fill_rect(
        &mut frame.rgba,
        w,
        h,
        panel_x,
        PANEL_TOP,
        panel_w,
        panel_h,
        PANEL_BG,
    );

    let text_x = panel_x + (8.0 * TIGHTEN) as i32;
    let text_y = PANEL_TOP + PANEL_PADDING;
    for (i, line) in lines.iter().enumerate() {
        font::draw_text(
            &mut frame.rgba,
            w,
            h,
            text_x,
            text_y + i as i32 * line_height,
            line,
            BODY_SCALE,
            TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::ToneWeights;
    use std::time::Instant;

    fn char_count(text: &str) -> u32 {
        text.chars().count() as u32
    }

    #[test]
    fn empty_text_wraps_to_one_empty_line() {
        let lines = wrap_to_width("", 100, char_count);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let lines = wrap_to_width("   \t ", 100, char_count);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn lines_fit_unless_a_single_word_overflows() {
        let text = "the p-value quantifies the probability of observing data";
        let max = 14;
        let lines = wrap_to_width(text, max, char_count);
        for line in &lines {
            let fits = char_count(line) <= max;
            let single_word = !line.contains(' ');
            assert!(fits || single_word, "bad line: {line:?}");
        }
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_to_width("a incomprehensibilities b", 5, char_count);
        assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn wrapping_preserves_every_word_in_order() {
        let text = "same prompt different voices for the same question";
        let lines = wrap_to_width(text, 12, char_count);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn wide_bound_yields_a_single_line() {
        let text = "short caption";
        let lines = wrap_to_width(text, 1000, char_count);
        assert_eq!(lines, vec![text.to_string()]);
    }

    #[test]
    fn wrapping_with_pixel_measurement_respects_the_bound() {
        let max = 200;
        for tone in Tone::ALL {
            for paragraph in tone.script().split('\n') {
                for line in wrap_to_width(paragraph, max, |t| font::text_width(t, BODY_SCALE)) {
                    let fits = font::text_width(&line, BODY_SCALE) <= max;
                    assert!(fits || !line.contains(' '), "bad line: {line:?}");
                }
            }
        }
    }

    #[test]
    fn scene_draws_without_panicking_on_small_frames() {
        let mut frame = Frame {
            rgba: vec![0u8; 64 * 48 * 4],
            width: 64,
            height: 48,
            timestamp: Instant::now(),
        };
        let pointer = Pointer {
            thumb: (10.0, 10.0),
            index: (30.0, 20.0),
            mid: (20.0, 15.0),
        };
        let weights = ToneWeights::from_pointer(Some(pointer.mid), 64, 48);
        draw_scene(&mut frame, Some(&pointer), weights.dominant());
    }
}
