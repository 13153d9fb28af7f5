use anyhow::{bail, Result};
use minifb::{Key, Window, WindowOptions};
use opencv::core::Mat;
use opencv::prelude::*;

use crate::counter::FrameReport;
use crate::pose::Pose;
use crate::render::canvas::Canvas;
use crate::render::overlay;

/// デバッグ表示ウィンドウ。描画は Canvas に行い update で転送する
pub struct MinifbRenderer {
    window: Window,
    canvas: Canvas,
}

impl MinifbRenderer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let options = WindowOptions {
            resize: false,
            ..WindowOptions::default()
        };
        Ok(Self {
            window: Window::new(title, width, height, options)?,
            canvas: Canvas::new(width, height),
        })
    }

    /// Esc か閉じるボタンで false
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// カメラフレーム (BGR, 8bit 3ch) を背景に敷く
    pub fn draw_frame(&mut self, frame: &Mat) -> Result<()> {
        if !frame.is_continuous() {
            bail!("frame buffer is not continuous");
        }
        self.canvas
            .blit_bgr(frame.data_bytes()?, frame.cols() as usize, frame.rows() as usize);
        Ok(())
    }

    pub fn draw_pose(&mut self, pose: &Pose, report: &FrameReport) {
        overlay::draw_pose(&mut self.canvas, pose, report);
    }

    pub fn draw_rep_markers(&mut self, rep_count: u32) {
        overlay::draw_rep_markers(&mut self.canvas, rep_count);
    }

    pub fn update(&mut self) -> Result<()> {
        let (width, height) = self.canvas.size();
        self.window.update_with_buffer(self.canvas.pixels(), width, height)?;
        Ok(())
    }
}
