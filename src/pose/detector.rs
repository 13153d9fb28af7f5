use anyhow::{bail, Context, Result};
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;

use super::landmark::{Landmark, LandmarkIndex, Pose};
use super::letterbox::{unletterbox_pose, LetterboxInfo};
use crate::config::ModelConfig;

/// 出力1行あたりの値数 (x, y, z, visibility, presence)
const VALUES_PER_LANDMARK: usize = 5;

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// BlazePose full-body ランドマークモデルを使用した姿勢検出器
pub struct PoseDetector {
    session: Session,
    input_name: String,
    landmarks_output: String,
    presence_output: String,
    min_presence: f32,
}

impl PoseDetector {
    /// ONNXモデルを読み込んで初期化
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?;

        #[cfg(feature = "cuda")]
        let builder = {
            tracing::info!("using CUDA execution provider");
            builder.with_execution_providers([ort::execution_providers::CUDAExecutionProvider::default().build()])?
        };

        let session = builder
            .commit_from_file(&config.path)
            .with_context(|| format!("Failed to load ONNX model: {}", config.path))?;

        Ok(Self {
            session,
            input_name: config.input_name.clone(),
            landmarks_output: config.landmarks_output.clone(),
            presence_output: config.presence_output.clone(),
            min_presence: config.min_presence,
        })
    }

    /// 前処理済みテンソルから姿勢を検出
    ///
    /// 入力: [1, 256, 256, 3] の f32 テンソル
    /// 出力: 人物がいなければ None、いれば元画像の正規化座標の Pose
    pub fn detect(&mut self, input: Array4<f32>, letterbox: &LetterboxInfo) -> Result<Option<Pose>> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .context("Inference failed")?;

        if !self.presence_output.is_empty() {
            let presence: ndarray::ArrayViewD<f32> = outputs[self.presence_output.as_str()]
                .try_extract_array()
                .context("Failed to extract presence tensor")?;
            let score = presence.iter().next().copied().unwrap_or(0.0);
            if score < self.min_presence {
                return Ok(None);
            }
        }

        // 出力は [1, 195] = 39 x (x, y, z, visibility, presence)
        // 先頭33行が身体ランドマーク、残りは補助点
        let output: ndarray::ArrayViewD<f32> = outputs[self.landmarks_output.as_str()]
            .try_extract_array()
            .context("Failed to extract landmarks tensor")?;
        let values: Vec<f32> = output.iter().copied().collect();
        if values.len() < LandmarkIndex::COUNT * VALUES_PER_LANDMARK {
            bail!("Unexpected landmarks output length: {}", values.len());
        }

        let mut pose = Pose::default();
        for (i, row) in values
            .chunks_exact(VALUES_PER_LANDMARK)
            .take(LandmarkIndex::COUNT)
            .enumerate()
        {
            pose.landmarks[i] = Landmark::new(row[0], row[1], row[2], sigmoid(row[3]));
        }
        unletterbox_pose(&mut pose, letterbox);

        Ok(Some(pose))
    }
}
