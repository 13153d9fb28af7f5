use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::pose::DEFAULT_MIN_VISIBILITY;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CounterConfig {
    /// 関節角度を計算するための最低可視度（この値以下は未検出）
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,
    /// この角度未満の脚はしゃがみ
    #[serde(default = "default_squat_below")]
    pub squat_below: f32,
    /// この角度以上の脚は直立
    #[serde(default = "default_upright_from")]
    pub upright_from: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラ番号
    #[serde(default)]
    pub index: i32,
    /// 指定があればカメラの代わりに動画ファイルを開く
    #[serde(default)]
    pub video_path: Option<String>,
    /// 処理前にリサイズする幅
    #[serde(default = "default_camera_width")]
    pub width: u32,
    /// 処理前にリサイズする高さ
    #[serde(default = "default_camera_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// BlazePose ランドマークモデル (ONNX)
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_input_name")]
    pub input_name: String,
    #[serde(default = "default_landmarks_output")]
    pub landmarks_output: String,
    /// 空文字なら人物有無の判定をしない
    #[serde(default = "default_presence_output")]
    pub presence_output: String,
    #[serde(default = "default_min_presence")]
    pub min_presence: f32,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct DebugConfig {
    /// デバッグウィンドウを表示
    #[serde(default)]
    pub view: bool,
}

fn default_min_visibility() -> f32 { DEFAULT_MIN_VISIBILITY }
fn default_squat_below() -> f32 { 105.0 }
fn default_upright_from() -> f32 { 150.0 }
fn default_camera_width() -> u32 { 1024 }
fn default_camera_height() -> u32 { 600 }
fn default_model_path() -> String { "models/pose_landmark_full.onnx".to_string() }
fn default_input_name() -> String { "input_1".to_string() }
fn default_landmarks_output() -> String { "Identity".to_string() }
fn default_presence_output() -> String { "Identity_1".to_string() }
fn default_min_presence() -> f32 { 0.5 }

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            min_visibility: default_min_visibility(),
            squat_below: default_squat_below(),
            upright_from: default_upright_from(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            video_path: None,
            width: default_camera_width(),
            height: default_camera_height(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            input_name: default_input_name(),
            landmarks_output: default_landmarks_output(),
            presence_output: default_presence_output(),
            min_presence: default_min_presence(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// ファイルがなければ既定値で続行。壊れた設定はエラー
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).with_context(|| format!("Invalid config {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "config not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn validate(&self) -> Result<()> {
        let c = &self.counter;
        if !(0.0..=1.0).contains(&c.min_visibility) {
            bail!("counter.min_visibility must be within [0, 1], got {}", c.min_visibility);
        }
        if c.squat_below > c.upright_from {
            bail!(
                "counter.squat_below ({}) must not exceed counter.upright_from ({})",
                c.squat_below,
                c.upright_from
            );
        }
        Ok(())
    }
}
