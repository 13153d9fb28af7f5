//! ランドマークの供給元
//!
//! 推論・動画デコードは供給元の責務。カウンタは `Observation` だけを見る。

#[cfg(feature = "desktop")]
pub mod camera;
pub mod replay;

#[cfg(feature = "desktop")]
pub use camera::CameraSource;
pub use replay::ReplaySource;

use anyhow::Result;

use crate::pose::Pose;

/// 1フレーム分の観測
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Landmarks(Pose),
    /// 人物が検出されなかった
    NoPerson,
}

/// フレームごとにランドマークを返す供給元
pub trait LandmarkSource {
    /// 次のフレームの観測。ストリームが終わったら `Ok(None)`
    fn next_observation(&mut self) -> Result<Option<Observation>>;
}
