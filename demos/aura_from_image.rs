//! Run the aura dial over a still image instead of a live camera:
//! detect the hand, print the tone weights, and write an annotated PNG.
//!
//! Usage: cargo run --example aura_from_image -- [input.png] [output.png] [model.onnx]

#[path = "../src/aura.rs"]
mod aura;
#[path = "../src/font.rs"]
mod font;
#[path = "../src/handpose.rs"]
mod handpose;
#[path = "../src/hud.rs"]
mod hud;
#[path = "../src/model.rs"]
mod model;
#[path = "../src/overlay.rs"]
mod overlay;
#[path = "../src/types.rs"]
mod types;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use aura::ToneWeights;
use handpose::HandposeEngine;
use types::Frame;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_image = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo/hand.png"));
    let output_image = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo/hand_with_auras.png"));
    let model_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(model::default_model_path);

    model::ensure_model_available(&model_path)?;
    let mut engine = HandposeEngine::new(&model_path)?;

    let image = image::open(&input_image)
        .with_context(|| format!("failed to open image {}", input_image.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    let mut frame = Frame {
        rgba: image.into_raw(),
        width,
        height,
        timestamp: Instant::now(),
    };

    let pose = engine.detect(&frame).context("inference failed")?;
    let pointer = pose.as_ref().and_then(handpose::pointer_from_pose);
    match &pose {
        Some(pose) => println!("hand detected with confidence {:.3}", pose.confidence),
        None => println!("no confident hand detection; using the default tone"),
    }

    let weights = ToneWeights::from_pointer(pointer.map(|p| p.mid), width, height);
    let dominant = weights.dominant();
    for tone in aura::Tone::ALL {
        println!("  {:>15}: {:.3}", tone.label(), weights.get(tone));
    }
    println!("dominant tone: {}", dominant.label());

    hud::draw_scene(&mut frame, pointer.as_ref(), dominant);

    let annotated = image::RgbaImage::from_raw(width, height, frame.rgba)
        .context("failed to rebuild annotated image")?;
    annotated
        .save(&output_image)
        .with_context(|| format!("failed to save {}", output_image.display()))?;
    println!("wrote {}", output_image.display());

    Ok(())
}
