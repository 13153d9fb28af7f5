use crate::counter::LegState;
use crate::pose::LandmarkIndex;

/// 胴体の接続定義（脚以外、白で描画）
pub const TORSO_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 4] = [
    (LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder),
    (LandmarkIndex::LeftShoulder, LandmarkIndex::LeftHip),
    (LandmarkIndex::RightShoulder, LandmarkIndex::RightHip),
    (LandmarkIndex::LeftHip, LandmarkIndex::RightHip),
];

/// 胴体の色 (RGB)
pub const TORSO_COLOR: u32 = 0xFFFFFF;

/// レップ数マーカーの色 (RGB)
pub const REP_MARKER_COLOR: u32 = 0x00FF00;

/// 脚の状態ごとの色 (RGB)
pub fn leg_color(state: LegState) -> u32 {
    match state {
        LegState::NotDetected => 0x808080, // 灰
        LegState::Squatting => 0x00FF00,   // 緑
        LegState::Transitioning => 0xFFFF00, // 黄
        LegState::Upright => 0x00A0FF,     // 青
    }
}
