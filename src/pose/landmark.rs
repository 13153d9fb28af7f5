use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// BlazePose (MediaPipe Pose) の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub const ALL: [LandmarkIndex; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// 記録ファイルで使う snake_case 名
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|idx| idx.name() == name)
    }
}

/// 左右の脚
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// (股関節, 膝, 足首)
    pub fn joints(self) -> (LandmarkIndex, LandmarkIndex, LandmarkIndex) {
        match self {
            Side::Left => (
                LandmarkIndex::LeftHip,
                LandmarkIndex::LeftKnee,
                LandmarkIndex::LeftAnkle,
            ),
            Side::Right => (
                LandmarkIndex::RightHip,
                LandmarkIndex::RightKnee,
                LandmarkIndex::RightAnkle,
            ),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f32,
    /// 腰中点を原点とした相対深度（X と同スケール）
    #[serde(default)]
    pub z: f32,
    /// 可視度 (0.0〜1.0)
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// 可視度が閾値を超えているか
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility > threshold
    }

    /// ピクセル座標に変換
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        let px = (self.x * width as f32) as i32;
        let py = (self.y * height as f32) as i32;
        (px, py)
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: 0.0,
        }
    }
}

/// 33ランドマークからなる姿勢
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub landmarks: [Landmark; LandmarkIndex::COUNT],
}

impl Pose {
    /// 名前付きランドマークから構築。指定のないランドマークは可視度0
    pub fn from_named(named: &HashMap<String, Landmark>) -> Result<Self> {
        let mut pose = Self::default();
        for (name, landmark) in named {
            let Some(index) = LandmarkIndex::from_name(name) else {
                bail!("unknown landmark name: {}", name);
            };
            pose.landmarks[index as usize] = *landmark;
        }
        Ok(pose)
    }

    /// 可視度0より大きいランドマークを名前付きで列挙
    pub fn to_named(&self) -> HashMap<String, Landmark> {
        LandmarkIndex::ALL
            .iter()
            .map(|&idx| (idx, self.landmarks[idx as usize]))
            .filter(|(_, lm)| lm.visibility > 0.0)
            .map(|(idx, lm)| (idx.name().to_string(), lm))
            .collect()
    }

    /// インデックスでランドマークを取得
    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    pub fn set(&mut self, index: LandmarkIndex, landmark: Landmark) {
        self.landmarks[index as usize] = landmark;
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LandmarkIndex::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_count() {
        assert_eq!(LandmarkIndex::COUNT, 33);
        for (i, idx) in LandmarkIndex::ALL.iter().enumerate() {
            assert_eq!(*idx as usize, i);
        }
    }

    #[test]
    fn test_landmark_name_roundtrip() {
        for idx in LandmarkIndex::ALL {
            assert_eq!(LandmarkIndex::from_name(idx.name()), Some(idx));
        }
        assert_eq!(LandmarkIndex::from_name("left_tail"), None);
    }

    #[test]
    fn test_side_joints() {
        assert_eq!(
            Side::Left.joints(),
            (LandmarkIndex::LeftHip, LandmarkIndex::LeftKnee, LandmarkIndex::LeftAnkle)
        );
        assert_eq!(Side::Right.joints().1 as usize, 26);
    }

    #[test]
    fn test_landmark_is_visible() {
        let lm = Landmark::new(0.5, 0.5, 0.0, 0.8);
        assert!(lm.is_visible(0.5));
        // 閾値ちょうどは不可視扱い
        assert!(!lm.is_visible(0.8));
    }

    #[test]
    fn test_landmark_to_pixel() {
        let lm = Landmark::new(0.5, 0.25, 0.0, 1.0);
        assert_eq!(lm.to_pixel(1024, 600), (512, 150));
    }

    #[test]
    fn test_pose_from_named() {
        let mut named = HashMap::new();
        named.insert("left_knee".to_string(), Landmark::new(0.4, 0.7, 0.1, 0.95));

        let pose = Pose::from_named(&named).unwrap();
        assert_eq!(pose.get(LandmarkIndex::LeftKnee).x, 0.4);
        assert_eq!(pose.get(LandmarkIndex::LeftKnee).z, 0.1);
        assert_eq!(pose.get(LandmarkIndex::RightKnee).visibility, 0.0);
        assert_eq!(pose.to_named(), named);
    }

    #[test]
    fn test_pose_from_named_rejects_unknown() {
        let mut named = HashMap::new();
        named.insert("left_elbw".to_string(), Landmark::default());
        assert!(Pose::from_named(&named).is_err());
    }
}
