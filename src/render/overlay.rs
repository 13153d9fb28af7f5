use crate::counter::FrameReport;
use crate::pose::{LandmarkIndex, Pose, Side};
use crate::render::canvas::Canvas;
use crate::render::skeleton::{leg_color, REP_MARKER_COLOR, TORSO_COLOR, TORSO_CONNECTIONS};

/// 表示に使う最低可視度
const DRAW_VISIBILITY: f32 = 0.5;

const JOINT_RADIUS: i32 = 5;
const MARKER_RADIUS: i32 = 7;
const MARKER_SPACING: i32 = 20;
/// 1行に並べるレップマーカーの最大数
const MARKERS_PER_ROW: u32 = 20;

/// 両端が見えている骨だけ線で結ぶ
fn draw_bone(canvas: &mut Canvas, pose: &Pose, bone: (LandmarkIndex, LandmarkIndex), color: u32) {
    let (w, h) = canvas.size();
    let (a, b) = (pose.get(bone.0), pose.get(bone.1));
    if a.is_visible(DRAW_VISIBILITY) && b.is_visible(DRAW_VISIBILITY) {
        canvas.line(a.to_pixel(w as u32, h as u32), b.to_pixel(w as u32, h as u32), color);
    }
}

/// 胴体と脚を描画。脚は状態ごとに色分けし、関節に円を置く
pub fn draw_pose(canvas: &mut Canvas, pose: &Pose, report: &FrameReport) {
    for bone in TORSO_CONNECTIONS {
        draw_bone(canvas, pose, bone, TORSO_COLOR);
    }

    let (w, h) = canvas.size();
    for side in Side::BOTH {
        let color = leg_color(report.leg(side).state);
        let (hip, knee, ankle) = side.joints();
        draw_bone(canvas, pose, (hip, knee), color);
        draw_bone(canvas, pose, (knee, ankle), color);
        for joint in [hip, knee, ankle] {
            let lm = pose.get(joint);
            if lm.is_visible(DRAW_VISIBILITY) {
                canvas.disk(lm.to_pixel(w as u32, h as u32), JOINT_RADIUS, color);
            }
        }
    }
}

/// 左上にレップ数ぶんのマーカーを並べる
pub fn draw_rep_markers(canvas: &mut Canvas, rep_count: u32) {
    for i in 0..rep_count {
        let col = (i % MARKERS_PER_ROW) as i32;
        let row = (i / MARKERS_PER_ROW) as i32;
        let origin = MARKER_SPACING / 2 + MARKER_RADIUS - 1;
        canvas.disk(
            (origin + col * MARKER_SPACING, origin + row * MARKER_SPACING),
            MARKER_RADIUS,
            REP_MARKER_COLOR,
        );
    }
}
