//! Software-rendered preview window (`minifb`, no GPU required).

use std::time::Duration;

use anyhow::{Result, anyhow};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::types::Frame;

const WINDOW_TITLE: &str = "Aura Dial";

pub struct Display {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl Display {
    /// Open a window sized to the camera frame.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let (width, height) = (width as usize, height as usize);
        let mut window = Window::new(
            WINDOW_TITLE,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|err| anyhow!("failed to open display window: {err}"))?;

        // ~60 fps cap; the camera read already paces the loop.
        window.limit_update_rate(Some(Duration::from_millis(16)));

        Ok(Display {
            window,
            buffer: vec![0u32; width * height],
            width,
            height,
        })
    }

    /// Push the frame's RGBA pixels to the window.
    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        for (dst, px) in self.buffer.iter_mut().zip(frame.rgba.chunks_exact(4)) {
            *dst = 0xFF00_0000
                | (u32::from(px[0]) << 16)
                | (u32::from(px[1]) << 8)
                | u32::from(px[2]);
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|err| anyhow!("window update failed: {err}"))
    }

    /// True once the user asked to quit: `q`, Escape, or window close.
    pub fn quit_requested(&self) -> bool {
        if !self.window.is_open() {
            return true;
        }
        self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }
}
