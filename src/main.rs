mod aura;
#[cfg(feature = "camera-nokhwa")]
mod camera;
mod display;
mod font;
mod handpose;
mod hud;
mod model;
mod overlay;
mod rgba;
mod speech;
mod types;

use anyhow::Result;

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "camera-nokhwa"))]
fn run() -> Result<()> {
    anyhow::bail!("built without camera support; rebuild with the `camera-nokhwa` feature")
}

#[cfg(feature = "camera-nokhwa")]
fn run() -> Result<()> {
    use std::time::Instant;

    use anyhow::Context;

    let model_path = model::default_model_path();
    model::ensure_model_available(&model_path)?;
    let mut engine = handpose::HandposeEngine::new(&model_path)?;
    log::info!("hand landmark model ready at {}", model_path.display());

    let mut capture = camera::Capture::open_first().context("cannot open camera")?;
    let first = capture
        .read_frame()
        .context("failed to read the first camera frame")?;
    let mut display = display::Display::new(first.width, first.height)?;

    let mut speaker = speech::Speaker::new();
    let mut gate = speech::SpeechGate::new();

    log::info!("aura dial running; press q or Escape to quit");

    let mut pending = Some(first);
    loop {
        let mut frame = match pending.take() {
            Some(frame) => frame,
            None => match capture.read_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    // A failed read counts as end-of-stream.
                    log::info!("camera stream ended: {err:#}");
                    break;
                }
            },
        };
        frame.mirror_horizontal();

        let pose = match engine.detect(&frame) {
            Ok(pose) => pose,
            Err(err) => {
                log::warn!("landmark inference failed: {err:#}");
                None
            }
        };
        let pointer = pose.as_ref().and_then(handpose::pointer_from_pose);
        let weights = aura::ToneWeights::from_pointer(
            pointer.map(|p| p.mid),
            frame.width,
            frame.height,
        );
        let dominant = weights.dominant();

        hud::draw_scene(&mut frame, pointer.as_ref(), dominant);
        display.present(&frame)?;

        if gate.permit(dominant, Instant::now()) {
            speaker.say(dominant.spoken_line());
        }

        if display.quit_requested() {
            break;
        }
    }

    Ok(())
}
