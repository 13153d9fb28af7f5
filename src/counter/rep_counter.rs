use crate::config::CounterConfig;
use crate::pose::{leg_angle, Pose, Side};
use crate::source::Observation;

use super::leg::{classify_leg, LegState, LegThresholds};
use super::machine::{transition, ConfirmedState, Feedback, SessionMemory};

/// 片脚の計測結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegReading {
    /// 膝角度（度）。未検出なら None
    pub angle: Option<f32>,
    pub state: LegState,
}

impl LegReading {
    const MISSING: LegReading = LegReading {
        angle: None,
        state: LegState::NotDetected,
    };
}

/// 1フレーム分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub left: LegReading,
    pub right: LegReading,
    pub feedback: Vec<Feedback>,
    /// 更新後のレップ数
    pub rep_count: u32,
}

impl FrameReport {
    pub fn leg(&self, side: Side) -> &LegReading {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn rep_confirmed(&self) -> bool {
        self.feedback.contains(&Feedback::RepConfirmed)
    }
}

/// ランドマーク → 角度 → 脚状態 → 状態機械 をまとめたカウンタ
pub struct RepCounter {
    min_visibility: f32,
    thresholds: LegThresholds,
    memory: SessionMemory,
}

impl RepCounter {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            min_visibility: config.min_visibility,
            thresholds: LegThresholds::from_config(config),
            memory: SessionMemory::default(),
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.memory.rep_count
    }

    pub fn last_confirmed(&self) -> ConfirmedState {
        self.memory.last_confirmed
    }

    pub fn process(&mut self, observation: &Observation) -> FrameReport {
        match observation {
            Observation::Landmarks(pose) => self.process_pose(pose),
            Observation::NoPerson => {
                let mut report = self.apply(LegReading::MISSING, LegReading::MISSING);
                report.feedback.insert(0, Feedback::StepIntoFrame);
                report
            }
        }
    }

    pub fn process_pose(&mut self, pose: &Pose) -> FrameReport {
        let left = self.read_leg(pose, Side::Left);
        let right = self.read_leg(pose, Side::Right);
        self.apply(left, right)
    }

    fn read_leg(&self, pose: &Pose, side: Side) -> LegReading {
        let angle = leg_angle(pose, side, self.min_visibility);
        LegReading {
            angle,
            state: classify_leg(angle, &self.thresholds),
        }
    }

    fn apply(&mut self, left: LegReading, right: LegReading) -> FrameReport {
        let step = transition(&self.memory, left.state, right.state);

        tracing::debug!(
            left_angle = ?left.angle,
            right_angle = ?right.angle,
            left = ?left.state,
            right = ?right.state,
            "leg states"
        );
        if step.next.last_confirmed != self.memory.last_confirmed {
            tracing::debug!(from = ?self.memory.last_confirmed, to = ?step.next.last_confirmed, "confirmed state changed");
        }
        if step.next.rep_count != self.memory.rep_count {
            tracing::info!(reps = step.next.rep_count, "rep confirmed");
        }

        self.memory = step.next;

        FrameReport {
            left,
            right,
            feedback: step.feedback,
            rep_count: self.memory.rep_count,
        }
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(&CounterConfig::default())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pose::{Landmark, LandmarkIndex};

    /// 膝角度を指定した脚を持つPose（None は脚を写さない）
    pub(crate) fn pose_with_angles(left: Option<f32>, right: Option<f32>) -> Pose {
        let mut pose = Pose::default();
        for (side, angle, x) in [(Side::Left, left, 0.45f32), (Side::Right, right, 0.55f32)] {
            let Some(angle) = angle else { continue };
            let (hip, knee, ankle) = side.joints();
            let rad = angle.to_radians();
            // 膝→股関節は真上、膝→足首は股関節方向から angle 回転
            pose.set(hip, Landmark::new(x, 0.5, 0.0, 0.99));
            pose.set(knee, Landmark::new(x, 0.7, 0.0, 0.99));
            pose.set(ankle, Landmark::new(x + 0.2 * rad.sin(), 0.7 - 0.2 * rad.cos(), 0.0, 0.99));
        }
        pose
    }

    fn both(angle: f32) -> Observation {
        Observation::Landmarks(pose_with_angles(Some(angle), Some(angle)))
    }

    const UPRIGHT: f32 = 175.0;
    const HALF: f32 = 130.0;
    const DEEP: f32 = 80.0;

    #[test]
    fn test_pose_helper_angles() {
        let pose = pose_with_angles(Some(DEEP), Some(HALF));
        let left = leg_angle(&pose, Side::Left, 0.8).unwrap();
        let right = leg_angle(&pose, Side::Right, 0.8).unwrap();
        assert!((left - DEEP).abs() < 0.01);
        assert!((right - HALF).abs() < 0.01);
    }

    #[test]
    fn test_scenario_full_cycle() {
        let mut counter = RepCounter::default();

        let r = counter.process(&both(UPRIGHT));
        assert_eq!(r.rep_count, 0);
        assert!(r.feedback.is_empty());
        assert_eq!(counter.last_confirmed(), ConfirmedState::Upright);

        let r = counter.process(&both(HALF));
        assert_eq!(r.left.state, LegState::Transitioning);
        assert_eq!(
            r.feedback,
            vec![Feedback::RetractLeg(Side::Left), Feedback::RetractLeg(Side::Right)]
        );
        assert_eq!(r.rep_count, 0);

        let r = counter.process(&both(DEEP));
        assert!(r.rep_confirmed());
        assert_eq!(r.rep_count, 1);
        assert_eq!(counter.last_confirmed(), ConfirmedState::Squatting);

        let r = counter.process(&both(DEEP));
        assert!(!r.rep_confirmed());
        assert_eq!(r.rep_count, 1);

        let r = counter.process(&both(UPRIGHT));
        assert_eq!(r.rep_count, 1);
        assert_eq!(counter.last_confirmed(), ConfirmedState::Upright);
    }

    #[test]
    fn test_left_leg_missing() {
        let mut counter = RepCounter::default();
        let r = counter.process(&Observation::Landmarks(pose_with_angles(None, Some(UPRIGHT))));
        assert_eq!(r.left, LegReading::MISSING);
        assert_eq!(r.right.state, LegState::Upright);
        assert_eq!(r.feedback, vec![Feedback::LegNotDetected(Side::Left)]);
        assert_eq!(r.rep_count, 0);
        assert_eq!(counter.last_confirmed(), ConfirmedState::Unset);
    }

    #[test]
    fn test_mixed_legs_do_not_count() {
        let mut counter = RepCounter::default();
        let r = counter.process(&Observation::Landmarks(pose_with_angles(Some(DEEP), Some(UPRIGHT))));
        assert_eq!(r.left.state, LegState::Squatting);
        assert_eq!(r.right.state, LegState::Upright);
        assert_eq!(r.feedback, vec![Feedback::RetractLeg(Side::Right)]);
        assert_eq!(r.rep_count, 0);
        assert_eq!(counter.last_confirmed(), ConfirmedState::Unset);
    }

    #[test]
    fn test_steady_upright_is_idempotent() {
        let mut counter = RepCounter::default();
        for _ in 0..20 {
            let r = counter.process(&both(UPRIGHT));
            assert_eq!(r.rep_count, 0);
        }
        assert_eq!(counter.last_confirmed(), ConfirmedState::Upright);
    }

    #[test]
    fn test_two_reps() {
        let mut counter = RepCounter::default();
        for angle in [UPRIGHT, DEEP, UPRIGHT, DEEP] {
            counter.process(&both(angle));
        }
        assert_eq!(counter.rep_count(), 2);
    }

    #[test]
    fn test_no_person_keeps_memory() {
        let mut counter = RepCounter::default();
        counter.process(&both(DEEP));

        let r = counter.process(&Observation::NoPerson);
        assert_eq!(
            r.feedback,
            vec![
                Feedback::StepIntoFrame,
                Feedback::LegNotDetected(Side::Left),
                Feedback::LegNotDetected(Side::Right),
            ]
        );
        assert_eq!(r.rep_count, 1);
        assert_eq!(counter.last_confirmed(), ConfirmedState::Squatting);

        // 戻ってきたら続きから数える
        counter.process(&both(UPRIGHT));
        let r = counter.process(&both(DEEP));
        assert_eq!(r.rep_count, 2);
    }

    #[test]
    fn test_low_visibility_knee() {
        let mut counter = RepCounter::default();
        let mut pose = pose_with_angles(Some(DEEP), Some(DEEP));
        let mut knee = *pose.get(LandmarkIndex::RightKnee);
        knee.visibility = 0.8;
        pose.set(LandmarkIndex::RightKnee, knee);

        let r = counter.process_pose(&pose);
        assert_eq!(r.right.state, LegState::NotDetected);
        assert_eq!(r.feedback, vec![Feedback::LegNotDetected(Side::Right)]);
        assert_eq!(r.rep_count, 0);
    }
}
