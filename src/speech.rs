//! Spoken output for tone changes. The gate is plain state and always
//! compiled; the engine itself sits behind the `speech` feature and every
//! engine failure is swallowed (the dial keeps working silently).

use std::time::{Duration, Instant};

use crate::aura::Tone;

/// Minimum gap between two utterances, regardless of tone changes.
pub const SPEECH_COOLDOWN: Duration = Duration::from_millis(1_200);

/// The only state carried across frames: the last spoken tone and when it
/// was spoken.
#[derive(Debug, Default)]
pub struct SpeechGate {
    last_tone: Option<Tone>,
    last_utterance: Option<Instant>,
}

impl SpeechGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and permit an utterance iff the dominant tone differs from
    /// the last spoken one and the cooldown has elapsed. The very first
    /// utterance is never time-blocked.
    pub fn permit(&mut self, tone: Tone, now: Instant) -> bool {
        if self.last_tone == Some(tone) {
            return false;
        }
        if let Some(last) = self.last_utterance {
            if now.duration_since(last) < SPEECH_COOLDOWN {
                return false;
            }
        }
        self.last_tone = Some(tone);
        self.last_utterance = Some(now);
        true
    }
}

#[cfg(feature = "speech")]
pub struct Speaker {
    engine: Option<tts::Tts>,
}

#[cfg(feature = "speech")]
impl Speaker {
    pub fn new() -> Self {
        let engine = match tts::Tts::default() {
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("speech engine unavailable, continuing without audio: {err}");
                None
            }
        };
        Speaker { engine }
    }

    pub fn say(&mut self, line: &str) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(err) = engine.speak(line, true) {
            log::debug!("speech request failed: {err}");
        }
    }
}

#[cfg(not(feature = "speech"))]
pub struct Speaker;

#[cfg(not(feature = "speech"))]
impl Speaker {
    pub fn new() -> Self {
        Speaker
    }

    pub fn say(&mut self, _line: &str) {}
}
