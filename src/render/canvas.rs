//! 0RGB (u32) のピクセルバッファと簡単な図形描画

/// 描画先バッファ。minifb にそのまま渡せる形式
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// 範囲外は無視
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < self.width && y < self.height {
                self.pixels[y * self.width + x] = color;
            }
        }
    }

    /// 連続した BGR 24bit 画像を左上から書き込む（はみ出しは切り捨て）
    pub fn blit_bgr(&mut self, bgr: &[u8], cols: usize, rows: usize) {
        let w = self.width.min(cols);
        for (y, src_row) in bgr.chunks_exact(cols * 3).take(rows.min(self.height)).enumerate() {
            let dst_row = &mut self.pixels[y * self.width..y * self.width + w];
            for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(3)) {
                *dst = (px[2] as u32) << 16 | (px[1] as u32) << 8 | px[0] as u32;
            }
        }
    }

    /// 長い方の軸で等間隔に刻む線分
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: u32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.put(from.0, from.1, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 as f32 + dx as f32 * t;
            let y = from.1 as f32 + dy as f32 * t;
            self.put(x.round() as i32, y.round() as i32, color);
        }
    }

    /// 塗りつぶし円（行ごとの水平区間で描く）
    pub fn disk(&mut self, center: (i32, i32), radius: i32, color: u32) {
        for dy in -radius..=radius {
            let half = ((radius * radius - dy * dy) as f32).sqrt() as i32;
            for x in center.0 - half..=center.0 + half {
                self.put(x, center.1 + dy, color);
            }
        }
    }
}
