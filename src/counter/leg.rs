use crate::config::CounterConfig;

/// 膝角度から判定した片脚の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegState {
    /// 関節が拾えていない
    NotDetected,
    /// しゃがみ
    Squatting,
    /// しゃがみと直立の中間
    Transitioning,
    /// 直立
    Upright,
}

impl LegState {
    /// 左右の組み合わせ判定用の数値 (0..=3)
    pub fn code(self) -> u8 {
        match self {
            LegState::NotDetected => 0,
            LegState::Squatting => 1,
            LegState::Transitioning => 2,
            LegState::Upright => 3,
        }
    }
}

/// 左右の状態コードの積
///
/// 0: 片脚以上が未検出 / 偶数: 片脚以上が中間 / 1: 両脚しゃがみ / 9: 両脚直立 / 3: 左右不一致
pub fn combined_code(left: LegState, right: LegState) -> u8 {
    left.code() * right.code()
}

/// 状態判定の角度閾値（度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegThresholds {
    pub squat_below: f32,
    pub upright_from: f32,
}

impl LegThresholds {
    pub fn from_config(config: &CounterConfig) -> Self {
        Self {
            squat_below: config.squat_below,
            upright_from: config.upright_from,
        }
    }
}

impl Default for LegThresholds {
    fn default() -> Self {
        Self::from_config(&CounterConfig::default())
    }
}

/// 膝角度 → 脚の状態
pub fn classify_leg(angle: Option<f32>, thresholds: &LegThresholds) -> LegState {
    match angle {
        None => LegState::NotDetected,
        Some(a) if a < thresholds.squat_below => LegState::Squatting,
        Some(a) if a < thresholds.upright_from => LegState::Transitioning,
        Some(_) => LegState::Upright,
    }
}
