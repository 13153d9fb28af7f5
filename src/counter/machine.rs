//! 両脚の状態からレップを数える状態機械
//!
//! 記憶するのは「最後に確定した全身の状態」とレップ数だけ。
//! 中間状態・未検出はフレーム限りで、記憶には残らない。

use std::fmt;

use super::leg::LegState;
use crate::pose::Side;

/// 両脚が一致して確定した全身の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmedState {
    /// セッション開始直後。フィードバックの向きは直立と同じ扱い
    #[default]
    Unset,
    Squatting,
    Upright,
}

/// セッション中に保持する記憶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionMemory {
    pub last_confirmed: ConfirmedState,
    pub rep_count: u32,
}

/// 1フレーム分の案内・診断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// 人物がフレームに写っていない
    StepIntoFrame,
    LegNotDetected(Side),
    /// しゃがみから戻る途中: 脚を伸ばしきる
    ExtendLeg(Side),
    /// 直立から下りる途中: 脚を曲げきる
    RetractLeg(Side),
    RepConfirmed,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::StepIntoFrame => write!(f, "please step into frame"),
            Feedback::LegNotDetected(side) => write!(f, "{} leg not detected", side),
            Feedback::ExtendLeg(side) => write!(f, "fully extend {} leg", side),
            Feedback::RetractLeg(side) => write!(f, "fully retract {} leg", side),
            Feedback::RepConfirmed => write!(f, "rep confirmed"),
        }
    }
}

/// 状態更新の結果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: SessionMemory,
    pub feedback: Vec<Feedback>,
}

/// 1フレーム分の状態更新（純粋関数）
pub fn transition(memory: &SessionMemory, left: LegState, right: LegState) -> Transition {
    let legs = [(Side::Left, left), (Side::Right, right)];
    let mut next = *memory;
    let mut feedback = Vec::new();

    match (left, right) {
        (LegState::NotDetected, _) | (_, LegState::NotDetected) => {
            feedback.extend(
                legs.iter()
                    .filter(|(_, state)| *state == LegState::NotDetected)
                    .map(|(side, _)| Feedback::LegNotDetected(*side)),
            );
        }
        (LegState::Squatting, LegState::Squatting) => {
            if memory.last_confirmed != ConfirmedState::Squatting {
                next.last_confirmed = ConfirmedState::Squatting;
                next.rep_count = next.rep_count.saturating_add(1);
                feedback.push(Feedback::RepConfirmed);
            }
        }
        (LegState::Upright, LegState::Upright) => {
            next.last_confirmed = ConfirmedState::Upright;
        }
        // 中間状態を含む、または左右不一致
        _ => {
            if memory.last_confirmed == ConfirmedState::Squatting {
                feedback.extend(
                    legs.iter()
                        .filter(|(_, state)| matches!(state, LegState::Transitioning | LegState::Squatting))
                        .map(|(side, _)| Feedback::ExtendLeg(*side)),
                );
            } else {
                feedback.extend(
                    legs.iter()
                        .filter(|(_, state)| matches!(state, LegState::Transitioning | LegState::Upright))
                        .map(|(side, _)| Feedback::RetractLeg(*side)),
                );
            }
        }
    }

    Transition { next, feedback }
}
