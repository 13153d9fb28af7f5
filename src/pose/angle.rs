//! 3点の関節角度
//!
//! 中央の関節 b を頂点として、a-b-c のなす角を度数で返す。

use super::landmark::{Landmark, Pose, Side};

/// 可視度の既定閾値（この値以下のランドマークは不可視扱い）
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.8;

/// b を頂点とする a-b-c の角度 [0, 180]
///
/// いずれかの可視度が `min_visibility` 以下、またはベクトル長が0の場合は `None`。
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark, min_visibility: f32) -> Option<f32> {
    if !(a.is_visible(min_visibility) && b.is_visible(min_visibility) && c.is_visible(min_visibility)) {
        return None;
    }

    let ba = [a.x - b.x, a.y - b.y, a.z - b.z];
    let bc = [c.x - b.x, c.y - b.y, c.z - b.z];

    let dot = ba[0] * bc[0] + ba[1] * bc[1] + ba[2] * bc[2];
    let norm_ba = (ba[0] * ba[0] + ba[1] * ba[1] + ba[2] * ba[2]).sqrt();
    let norm_bc = (bc[0] * bc[0] + bc[1] * bc[1] + bc[2] * bc[2]).sqrt();

    if !(norm_ba > f32::EPSILON && norm_bc > f32::EPSILON) {
        return None;
    }

    let cos = dot / (norm_ba * norm_bc);
    if !cos.is_finite() {
        return None;
    }

    // 丸め誤差で [-1, 1] をわずかに超えることがある
    let angle = cos.clamp(-1.0, 1.0).acos().to_degrees();

    if angle > 180.0 {
        Some(360.0 - angle)
    } else {
        Some(angle)
    }
}

/// 股関節-膝-足首 の膝角度
pub fn leg_angle(pose: &Pose, side: Side, min_visibility: f32) -> Option<f32> {
    let (hip, knee, ankle) = side.joints();
    joint_angle(pose.get(hip), pose.get(knee), pose.get(ankle), min_visibility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::LandmarkIndex;

    fn lm(x: f32, y: f32, z: f32) -> Landmark {
        Landmark::new(x, y, z, 0.99)
    }

    #[test]
    fn test_straight_leg() {
        let angle = joint_angle(&lm(0.5, 0.5, 0.0), &lm(0.5, 0.7, 0.0), &lm(0.5, 0.9, 0.0), 0.8).unwrap();
        assert!((angle - 180.0).abs() < 0.1);
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(&lm(0.5, 0.5, 0.0), &lm(0.5, 0.7, 0.0), &lm(0.7, 0.7, 0.0), 0.8).unwrap();
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_depth_contributes() {
        // 膝から足首が奥行き方向に伸びる → 90度
        let angle = joint_angle(&lm(0.5, 0.5, 0.0), &lm(0.5, 0.7, 0.0), &lm(0.5, 0.7, 0.3), 0.8).unwrap();
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_folded_leg() {
        let angle = joint_angle(&lm(0.5, 0.5, 0.0), &lm(0.5, 0.7, 0.0), &lm(0.5, 0.55, 0.0), 0.8).unwrap();
        assert!(angle.abs() < 0.1);
    }

    #[test]
    fn test_low_visibility_is_unknown() {
        let good = lm(0.5, 0.5, 0.0);
        let knee = lm(0.5, 0.7, 0.0);
        let ankle = lm(0.7, 0.7, 0.0);
        let dim = Landmark::new(0.5, 0.7, 0.0, 0.8);

        assert!(joint_angle(&dim, &knee, &ankle, 0.8).is_none());
        assert!(joint_angle(&good, &dim, &ankle, 0.8).is_none());
        assert!(joint_angle(&good, &knee, &dim, 0.8).is_none());
        // 閾値を下げれば計算される
        assert!(joint_angle(&good, &dim, &ankle, 0.5).is_some());
    }

    #[test]
    fn test_degenerate_vector_is_unknown() {
        let p = lm(0.5, 0.5, 0.0);
        assert!(joint_angle(&p, &p, &lm(0.5, 0.9, 0.0), 0.8).is_none());
        assert!(joint_angle(&lm(0.5, 0.1, 0.0), &p, &p, 0.8).is_none());
    }

    #[test]
    fn test_non_finite_is_unknown() {
        let nan = lm(f32::NAN, 0.5, 0.0);
        assert!(joint_angle(&nan, &lm(0.5, 0.7, 0.0), &lm(0.5, 0.9, 0.0), 0.8).is_none());
    }

    #[test]
    fn test_angle_always_in_range() {
        let b = lm(0.3, -0.2, 0.1);
        for i in 0..12 {
            for j in 0..12 {
                let t = i as f32 * 0.53;
                let u = j as f32 * 0.37;
                let a = lm(t.cos(), t.sin(), 0.5 * u.cos());
                let c = lm(u.sin() * 2.0, -u.cos(), t.sin() - 0.3);
                if let Some(angle) = joint_angle(&a, &b, &c, 0.8) {
                    assert!((0.0..=180.0).contains(&angle), "{} out of range", angle);
                }
            }
        }
    }

    #[test]
    fn test_leg_angle_uses_side_joints() {
        let mut pose = Pose::default();
        pose.set(LandmarkIndex::LeftHip, lm(0.4, 0.5, 0.0));
        pose.set(LandmarkIndex::LeftKnee, lm(0.4, 0.7, 0.0));
        pose.set(LandmarkIndex::LeftAnkle, lm(0.6, 0.7, 0.0));

        let left = leg_angle(&pose, Side::Left, DEFAULT_MIN_VISIBILITY).unwrap();
        assert!((left - 90.0).abs() < 0.01);
        assert!(leg_angle(&pose, Side::Right, DEFAULT_MIN_VISIBILITY).is_none());
    }
}
