use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

const HANDPOSE_MODEL_FILENAME: &str = "handpose_estimation_mediapipe_2023feb.onnx";
const HANDPOSE_MODEL_URL: &str = "https://raw.githubusercontent.com/214zzl995/gesture-universe/refs/heads/main/models/handpose_estimation_mediapipe_2023feb.onnx";

pub fn default_model_path() -> PathBuf {
    PathBuf::from("models").join(HANDPOSE_MODEL_FILENAME)
}

/// Verify the landmark model is on disk. The model is consumed as a black
/// box; it is never fetched automatically.
pub fn ensure_model_available(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    bail!(
        "hand landmark model not found at {}.\n\
         Download it manually:\n  curl -L -o {} \\\n    {}\n\
         then run again.",
        path.display(),
        path.display(),
        HANDPOSE_MODEL_URL,
    )
}
