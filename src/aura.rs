//! The four auras: fixed screen anchors, colors, scripts, and the
//! inverse-distance weighting that turns a pointer position into a blend.

/// Fallback when no hand is in frame (all weights zero).
pub const DEFAULT_TONE: Tone = Tone::Professional;

/// Distances are floored at one pixel before taking reciprocals.
const MIN_DISTANCE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Academic,
    Professional,
    Conversational,
    Playful,
}

impl Tone {
    /// Declaration order; also the tie-break order for equal weights.
    pub const ALL: [Tone; 4] = [
        Tone::Academic,
        Tone::Professional,
        Tone::Conversational,
        Tone::Playful,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Academic => "academic",
            Tone::Professional => "professional",
            Tone::Conversational => "conversational",
            Tone::Playful => "playful",
        }
    }

    /// Anchor position as fractions of the frame size.
    pub fn anchor_rel(&self) -> (f32, f32) {
        match self {
            Tone::Academic => (0.78, 0.18),
            Tone::Professional => (0.22, 0.28),
            Tone::Conversational => (0.12, 0.75),
            Tone::Playful => (0.6, 0.75),
        }
    }

    pub fn anchor_px(&self, frame_w: u32, frame_h: u32) -> (f32, f32) {
        let (rx, ry) = self.anchor_rel();
        (rx * frame_w as f32, ry * frame_h as f32)
    }

    pub fn color(&self) -> [u8; 4] {
        match self {
            Tone::Academic => [120, 220, 30, 255],
            Tone::Professional => [250, 150, 200, 255],
            Tone::Conversational => [40, 120, 210, 255],
            Tone::Playful => [220, 120, 40, 255],
        }
    }

    /// Prompt line plus body line, joined by a newline.
    pub fn script(&self) -> &'static str {
        match self {
            Tone::Academic => {
                "Explain the p-value in an academic tone:\n\
                 The p-value quantifies the probability of observing data as extreme as, \
                 or more extreme than, the observed data, assuming the null hypothesis is true."
            }
            Tone::Professional => {
                "Explain the p-value in a professional tone:\n\
                 The p-value quantifies the probability of observing data as extreme as, \
                 or more extreme than, the observed data, assuming the null hypothesis is true."
            }
            Tone::Conversational => {
                "Explain the p-value in a conversational tone:\n\
                 Think of the p-value as the chance your surprising result might just be \
                 luck - lower means less likely due to chance."
            }
            Tone::Playful => {
                "Explain the p-value in a playful tone:\n\
                 It's the chance your \"amazing\" finding is just a fluke, like finding a \
                 unicorn doing your laundry."
            }
        }
    }

    /// What the speech engine reads out: the body, without the prompt line.
    pub fn spoken_line(&self) -> &'static str {
        self.script().rsplit('\n').next().unwrap_or_default()
    }
}

/// Per-tone weights in [0, 1]. Sum to 1 when derived from a pointer,
/// all zero otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneWeights {
    values: [f32; 4],
}

impl ToneWeights {
    pub fn zero() -> Self {
        ToneWeights { values: [0.0; 4] }
    }

    /// Inverse-distance weighting from the pointer to each anchor.
    pub fn from_pointer(pointer: Option<(f32, f32)>, frame_w: u32, frame_h: u32) -> Self {
        let Some((px, py)) = pointer else {
            return Self::zero();
        };

        let mut values = [0.0f32; 4];
        for (slot, tone) in values.iter_mut().zip(Tone::ALL) {
            let (ax, ay) = tone.anchor_px(frame_w, frame_h);
            let distance = (px - ax).hypot(py - ay).max(MIN_DISTANCE);
            *slot = 1.0 / distance;
        }

        let sum: f32 = values.iter().sum();
        if sum > 0.0 {
            for value in &mut values {
                *value /= sum;
            }
        }

        ToneWeights { values }
    }

    pub fn get(&self, tone: Tone) -> f32 {
        let idx = Tone::ALL.iter().position(|t| *t == tone).unwrap_or(0);
        self.values[idx]
    }

    /// Arg-max over declaration order; the first maximal tone wins ties.
    /// All-zero weights fall back to [`DEFAULT_TONE`].
    pub fn dominant(&self) -> Tone {
        if self.values.iter().all(|v| *v == 0.0) {
            return DEFAULT_TONE;
        }

        let mut best = Tone::ALL[0];
        let mut best_value = self.values[0];
        for (tone, value) in Tone::ALL.into_iter().zip(self.values).skip(1) {
            if value > best_value {
                best = tone;
                best_value = value;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 1000;
    const H: u32 = 1000;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} vs {b}");
    }

    #[test]
    fn weights_are_nonnegative_and_sum_to_one() {
        let pointers = [
            (0.0, 0.0),
            (999.0, 999.0),
            (500.0, 500.0),
            (780.0, 180.0), // exactly on an anchor
            (1.0, 999.0),
        ];
        for pointer in pointers {
            let weights = ToneWeights::from_pointer(Some(pointer), W, H);
            let mut sum = 0.0;
            for tone in Tone::ALL {
                let w = weights.get(tone);
                assert!(w >= 0.0, "negative weight for {tone:?} at {pointer:?}");
                sum += w;
            }
            assert_close(sum, 1.0);
        }
    }

    #[test]
    fn no_pointer_means_zero_weights_and_default_tone() {
        let weights = ToneWeights::from_pointer(None, W, H);
        for tone in Tone::ALL {
            assert_eq!(weights.get(tone), 0.0);
        }
        assert_eq!(weights.dominant(), DEFAULT_TONE);
    }

    #[test]
    fn dominant_is_always_one_of_the_four() {
        let pointers = [(0.0, 0.0), (500.0, 500.0), (999.0, 0.0)];
        for pointer in pointers {
            let dominant = ToneWeights::from_pointer(Some(pointer), W, H).dominant();
            assert!(Tone::ALL.contains(&dominant));
        }
    }

    #[test]
    fn pointer_on_anchor_dominates() {
        for tone in Tone::ALL {
            let anchor = tone.anchor_px(W, H);
            let weights = ToneWeights::from_pointer(Some(anchor), W, H);
            assert_eq!(weights.dominant(), tone);
        }
    }

    #[test]
    fn equidistant_anchors_get_equal_weights() {
        // Midpoint of two anchors lies on their perpendicular bisector.
        let a = Tone::Academic.anchor_px(W, H);
        let b = Tone::Playful.anchor_px(W, H);
        let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
        let weights = ToneWeights::from_pointer(Some(mid), W, H);
        assert_close(weights.get(Tone::Academic), weights.get(Tone::Playful));
    }

    #[test]
    fn ties_resolve_to_declaration_order() {
        let weights = ToneWeights { values: [0.25; 4] };
        assert_eq!(weights.dominant(), Tone::Academic);
    }

    #[test]
    fn spoken_line_is_script_body() {
        for tone in Tone::ALL {
            let line = tone.spoken_line();
            assert!(!line.contains('\n'));
            assert!(tone.script().ends_with(line));
            assert!(!line.starts_with("Explain"));
        }
    }
}
