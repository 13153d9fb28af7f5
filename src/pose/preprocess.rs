use anyhow::Result;
use ndarray::Array4;
use opencv::{
    core::{self, AlgorithmHint, Mat, Scalar, Size, CV_32FC3},
    imgproc,
    prelude::*,
};

use super::letterbox::LetterboxInfo;

/// BlazePose ランドマークモデルの入力サイズ
pub const BLAZEPOSE_INPUT_SIZE: i32 = 256;

/// OpenCV Mat を BlazePose 用の入力テンソルに変換
///
/// - BGR -> RGB
/// - アスペクト比を保って 256x256 にレターボックス
/// - [1, 256, 256, 3] の f32 テンソルに変換 (0.0-1.0)
pub fn preprocess_for_blazepose(frame: &Mat) -> Result<(Array4<f32>, LetterboxInfo)> {
    let info = LetterboxInfo::new(
        frame.cols() as u32,
        frame.rows() as u32,
        BLAZEPOSE_INPUT_SIZE as u32,
    );

    // BGR -> RGB
    let mut rgb = Mat::default();
    imgproc::cvt_color(frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0, AlgorithmHint::ALGO_HINT_DEFAULT)?;

    let (scaled_w, scaled_h) = info.scaled_size();
    let mut resized = Mat::default();
    imgproc::resize(
        &rgb,
        &mut resized,
        Size::new(scaled_w, scaled_h),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;

    // 余白を黒で埋める
    let pad_left = info.pad_x as i32;
    let pad_top = info.pad_y as i32;
    let mut boxed = Mat::default();
    core::copy_make_border(
        &resized,
        &mut boxed,
        pad_top,
        BLAZEPOSE_INPUT_SIZE - scaled_h - pad_top,
        pad_left,
        BLAZEPOSE_INPUT_SIZE - scaled_w - pad_left,
        core::BORDER_CONSTANT,
        Scalar::all(0.0),
    )?;

    // f32 (0.0-1.0) に変換
    let mut float_mat = Mat::default();
    boxed.convert_to(&mut float_mat, CV_32FC3, 1.0 / 255.0, 0.0)?;

    let size = BLAZEPOSE_INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 3));

    for y in 0..BLAZEPOSE_INPUT_SIZE {
        for x in 0..BLAZEPOSE_INPUT_SIZE {
            let pixel = float_mat.at_2d::<opencv::core::Vec3f>(y, x)?;
            tensor[[0, y as usize, x as usize, 0]] = pixel[0];
            tensor[[0, y as usize, x as usize, 1]] = pixel[1];
            tensor[[0, y as usize, x as usize, 2]] = pixel[2];
        }
    }

    Ok((tensor, info))
}
