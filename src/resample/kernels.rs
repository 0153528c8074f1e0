//! Sampling kernels shared by zoom and rotate.
//!
//! Each `sample_*` method writes one output pixel (every channel) for a
//! real-valued source coordinate and reports whether the coordinate lay
//! inside the region that kernel can serve. Callers decide what to do
//! with the misses: zoom falls back to a plain lookup, rotate paints the
//! fill color.

use crate::image::CanonicalImage;

/// Borrowed view of the buffer being resampled.
pub(crate) struct Source<'a> {
    pixels: &'a [u8],
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl<'a> Source<'a> {
    pub fn new(image: &'a CanonicalImage) -> Self {
        Self {
            pixels: image.pixels(),
            width: image.width() as usize,
            height: image.height() as usize,
            channels: image.channels(),
        }
    }

    #[inline]
    fn at(&self, x: usize, y: usize, c: usize) -> u8 {
        self.pixels[(y * self.width + x) * self.channels + c]
    }

    /// Copy pixel `(x, y)` verbatim.
    #[inline]
    pub fn copy_pixel(&self, x: usize, y: usize, out: &mut [u8]) {
        let off = (y * self.width + x) * self.channels;
        out.copy_from_slice(&self.pixels[off..off + self.channels]);
    }

    /// Nearest neighbor: rounds the coordinate to the closest pixel.
    pub fn sample_nearest(&self, src_x: f64, src_y: f64, out: &mut [u8]) -> bool {
        let (rx, ry) = (src_x + 0.5, src_y + 0.5);
        if rx < 0.0 || ry < 0.0 {
            return false;
        }
        let (u, v) = (rx as usize, ry as usize);
        if u >= self.width || v >= self.height {
            return false;
        }
        self.copy_pixel(u, v, out);
        true
    }

    /// Bilinear over the 2×2 block whose top-left corner is `floor(src)`.
    pub fn sample_bilinear(&self, src_x: f64, src_y: f64, out: &mut [u8]) -> bool {
        if src_x < 0.0 || src_y < 0.0 {
            return false;
        }
        let (u, v) = (src_x as usize, src_y as usize);
        if u + 1 >= self.width || v + 1 >= self.height {
            return false;
        }
        let (x_pos, y_pos) = (src_x - u as f64, src_y - v as f64);
        for (c, sample) in out.iter_mut().enumerate() {
            let around = [
                [self.at(u, v, c), self.at(u + 1, v, c)],
                [self.at(u, v + 1, c), self.at(u + 1, v + 1, c)],
            ];
            *sample = bilinear(&around, x_pos, y_pos);
        }
        true
    }

    /// Cubic convolution over the 4×4 block spanning `floor(src) - 1` to
    /// `floor(src) + 2`. The `-1` tap is clamped to the first row/column.
    pub fn sample_cubic(&self, src_x: f64, src_y: f64, out: &mut [u8]) -> bool {
        if src_x < 0.0 || src_y < 0.0 {
            return false;
        }
        let (u, v) = (src_x as usize, src_y as usize);
        if u + 2 >= self.width || v + 2 >= self.height {
            return false;
        }
        let (x_pos, y_pos) = (src_x - u as f64, src_y - v as f64);
        let cols = [u.saturating_sub(1), u, u + 1, u + 2];
        let rows = [v.saturating_sub(1), v, v + 1, v + 2];
        for (c, sample) in out.iter_mut().enumerate() {
            let mut around = [[0u8; 4]; 4];
            for (row, &y) in around.iter_mut().zip(&rows) {
                for (cell, &x) in row.iter_mut().zip(&cols) {
                    *cell = self.at(x, y, c);
                }
            }
            *sample = cubic(&around, x_pos, y_pos);
        }
        true
    }
}

/// Vertical lerp down each column, truncated to a whole sample, then
/// horizontal lerp across.
///
/// `around[row][col]`, row 0 above row 1.
pub(crate) fn bilinear(around: &[[u8; 2]; 2], x_pos: f64, y_pos: f64) -> u8 {
    let column = |col: usize| {
        ((1.0 - y_pos) * f64::from(around[0][col]) + y_pos * f64::from(around[1][col])).trunc()
    };
    let (left, right) = (column(0), column(1));
    to_sample((1.0 - x_pos) * left + x_pos * right)
}

/// Separable cubic convolution: row weights applied down each column,
/// the column sums then dotted with the column weights.
pub(crate) fn cubic(around: &[[u8; 4]; 4], x_pos: f64, y_pos: f64) -> u8 {
    let col_weights = tap_weights(x_pos);
    let row_weights = tap_weights(y_pos);

    let mut acc = 0.0;
    for (col, &cw) in col_weights.iter().enumerate() {
        let column: f64 = row_weights
            .iter()
            .zip(around)
            .map(|(&rw, row)| rw * f64::from(row[col]))
            .sum();
        acc += column * cw;
    }
    to_sample(acc)
}

/// Weights for taps at offsets `-1, 0, +1, +2` from the integer position.
fn tap_weights(frac: f64) -> [f64; 4] {
    [
        cubic_kernel(frac + 1.0),
        cubic_kernel(frac),
        cubic_kernel(frac - 1.0),
        cubic_kernel(frac - 2.0),
    ]
}

/// `s(w) = 1 - 2w² + |w|³` for `|w| < 1`, `4 - 8|w| + 5w² - |w|³` for
/// `1 <= |w| < 2`, zero beyond.
pub(crate) fn cubic_kernel(w: f64) -> f64 {
    let a = w.abs();
    if a < 1.0 {
        1.0 - 2.0 * a * a + a * a * a
    } else if a < 2.0 {
        4.0 - 8.0 * a + 5.0 * a * a - a * a * a
    } else {
        0.0
    }
}

/// Clamp to [0, 255] and truncate.
#[inline]
pub(crate) fn to_sample(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
