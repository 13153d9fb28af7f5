use super::landmark::Pose;

/// レターボックス変換のパラメータ
///
/// 元画像をアスペクト比を保ったまま正方形の入力にリサイズし、余白を埋める。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// 元画像サイズ
    pub src_width: u32,
    pub src_height: u32,
    /// 正方形入力の一辺
    pub input_size: u32,
    /// 元画像 → 入力 の倍率
    pub scale: f32,
    /// 入力上の余白（左・上）
    pub pad_x: f32,
    pub pad_y: f32,
}

impl LetterboxInfo {
    pub fn new(src_width: u32, src_height: u32, input_size: u32) -> Self {
        let scale = (input_size as f32 / src_width as f32).min(input_size as f32 / src_height as f32);
        let scaled_w = (src_width as f32 * scale).round();
        let scaled_h = (src_height as f32 * scale).round();
        Self {
            src_width,
            src_height,
            input_size,
            scale,
            pad_x: ((input_size as f32 - scaled_w) / 2.0).floor(),
            pad_y: ((input_size as f32 - scaled_h) / 2.0).floor(),
        }
    }

    /// リサイズ後（余白なし）のサイズ
    pub fn scaled_size(&self) -> (i32, i32) {
        (
            (self.src_width as f32 * self.scale).round() as i32,
            (self.src_height as f32 * self.scale).round() as i32,
        )
    }

    /// 入力ピクセル座標 → 元画像の正規化座標
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        let sx = (x - self.pad_x) / self.scale / self.src_width as f32;
        let sy = (y - self.pad_y) / self.scale / self.src_height as f32;
        (sx, sy)
    }

    /// 入力ピクセル単位の深度 → 元画像の幅で正規化した深度
    pub fn depth_to_source(&self, z: f32) -> f32 {
        z / self.scale / self.src_width as f32
    }
}

/// 入力ピクセル座標のPoseを元画像の正規化座標に戻す
pub fn unletterbox_pose(pose: &mut Pose, info: &LetterboxInfo) {
    for lm in pose.landmarks.iter_mut() {
        let (x, y) = info.to_source(lm.x, lm.y);
        lm.x = x;
        lm.y = y;
        lm.z = info.depth_to_source(lm.z);
    }
}
