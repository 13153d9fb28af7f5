use anyhow::{Context, Result};
use opencv::{
    core::{Mat, Size},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureAPIs},
};

use crate::config::CameraConfig;

/// OpenCVを使用したフレーム取得（カメラまたは動画ファイル）
pub struct OpenCvCamera {
    capture: VideoCapture,
    width: u32,
    height: u32,
    from_file: bool,
}

impl OpenCvCamera {
    /// 設定に従って開く（video_path があれば動画ファイル）
    pub fn from_config(config: &CameraConfig) -> Result<Self> {
        match &config.video_path {
            Some(path) => Self::open_file(path, config.width, config.height),
            None => Self::open(config.index, config.width, config.height),
        }
    }

    /// カメラを開く。フレームは width x height にリサイズして返す
    pub fn open(index: i32, width: u32, height: u32) -> Result<Self> {
        let mut capture =
            VideoCapture::new(index, VideoCaptureAPIs::CAP_ANY as i32).context("Failed to open camera")?;

        if !capture.is_opened()? {
            anyhow::bail!("Camera {} is not available", index);
        }
        capture.set(videoio::CAP_PROP_BUFFERSIZE, 1.0)?;

        let actual_fps = capture.get(videoio::CAP_PROP_FPS)?;
        tracing::info!(index, fps = actual_fps, "camera opened");

        Ok(Self {
            capture,
            width,
            height,
            from_file: false,
        })
    }

    /// 動画ファイルを開く
    pub fn open_file(path: &str, width: u32, height: u32) -> Result<Self> {
        let capture = VideoCapture::from_file(path, VideoCaptureAPIs::CAP_ANY as i32)
            .with_context(|| format!("Failed to open video {}", path))?;

        if !capture.is_opened()? {
            anyhow::bail!("Video {} could not be opened", path);
        }
        tracing::info!(path, "video opened");

        Ok(Self {
            capture,
            width,
            height,
            from_file: true,
        })
    }

    /// 出力解像度
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// フレームを読み込む（BGR形式、リサイズ済み）
    ///
    /// 動画ファイルの終端では None。
    pub fn read_frame(&mut self) -> Result<Option<Mat>> {
        if !self.capture.is_opened()? {
            return Ok(None);
        }

        let mut frame = Mat::default();
        let ok = self.capture.read(&mut frame).context("Failed to read frame")?;

        if !ok || frame.empty() {
            if self.from_file {
                return Ok(None);
            }
            anyhow::bail!("Empty frame received");
        }

        let mut resized = Mat::default();
        imgproc::resize(
            &frame,
            &mut resized,
            Size::new(self.width as i32, self.height as i32),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;

        Ok(Some(resized))
    }
}
