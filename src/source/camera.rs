use anyhow::Result;
use opencv::core::Mat;

use super::{LandmarkSource, Observation};
use crate::camera::OpenCvCamera;
use crate::config::Config;
use crate::pose::{preprocess_for_blazepose, PoseDetector};

/// カメラ + BlazePose による実時間の供給元
pub struct CameraSource {
    camera: OpenCvCamera,
    detector: PoseDetector,
    last_frame: Option<Mat>,
}

impl CameraSource {
    pub fn new(camera: OpenCvCamera, detector: PoseDetector) -> Self {
        Self {
            camera,
            detector,
            last_frame: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let camera = OpenCvCamera::from_config(&config.camera)?;
        let detector = PoseDetector::new(&config.model)?;
        tracing::info!(model = %config.model.path, "model loaded");
        Ok(Self::new(camera, detector))
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.camera.resolution()
    }

    /// 直前に処理したフレーム（デバッグ表示用）
    pub fn last_frame(&self) -> Option<&Mat> {
        self.last_frame.as_ref()
    }
}

impl LandmarkSource for CameraSource {
    fn next_observation(&mut self) -> Result<Option<Observation>> {
        let Some(frame) = self.camera.read_frame()? else {
            return Ok(None);
        };

        let (input, letterbox) = preprocess_for_blazepose(&frame)?;
        let observation = match self.detector.detect(input, &letterbox)? {
            Some(pose) => Observation::Landmarks(pose),
            None => Observation::NoPerson,
        };

        self.last_frame = Some(frame);
        Ok(Some(observation))
    }
}
