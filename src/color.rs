//! Pointwise color filters over a [`CanonicalImage`].
//!
//! Every filter maps each sample independently and never resizes the image.
//! Only [`to_grayscale`] (and [`binarize`], which calls it) changes the
//! channel count.

use alloc::vec::Vec;

use crate::image::CanonicalImage;

/// Parameters of the logarithmic and exponential tone curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stretch {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Stretch {
    /// `a = 0, b = 0.033, c = 2`: brightens.
    pub const LOG_REFERENCE: Self = Self {
        a: 0.0,
        b: 0.033,
        c: 2.0,
    };

    /// `a = 128, b = 2, c = 0.6`: darkens.
    pub const EXP_REFERENCE: Self = Self {
        a: 128.0,
        b: 2.0,
        c: 0.6,
    };
}

/// Collapse BGR to one channel with `0.3·B + 0.59·G + 0.11·R`.
pub fn to_grayscale(image: &mut CanonicalImage) {
    if image.is_grayscale() {
        return;
    }
    let gray: Vec<u8> = image
        .pixels()
        .chunks_exact(3)
        .map(|px| {
            (0.3 * f64::from(px[0]) + 0.59 * f64::from(px[1]) + 0.11 * f64::from(px[2])) as u8
        })
        .collect();
    let (w, h) = (image.width(), image.height());
    image.replace(w, h, true, gray);
}

/// Threshold to pure black and white; converts to grayscale first.
pub fn binarize(image: &mut CanonicalImage, threshold: u8) {
    to_grayscale(image);
    for v in image.pixels_mut() {
        *v = if *v < threshold { 0 } else { 255 };
    }
}

/// Photographic negative.
pub fn invert(image: &mut CanonicalImage) {
    for v in image.pixels_mut() {
        *v = 255 - *v;
    }
}

/// `g = a + ln(f + 1) / (b · ln c)`.
pub fn log_stretch(image: &mut CanonicalImage, params: Stretch) {
    let Stretch { a, b, c } = params;
    let denom = b * c.ln();
    apply_curve(image, |f| a + (f + 1.0).ln() / denom);
}

/// `g = b^(c · (f - a)) - 1`.
pub fn exp_stretch(image: &mut CanonicalImage, params: Stretch) {
    let Stretch { a, b, c } = params;
    apply_curve(image, |f| b.powf(c * (f - a)) - 1.0);
}

/// Evaluate `curve` once per possible input through a lookup table, clamp
/// and truncate.
fn apply_curve(image: &mut CanonicalImage, curve: impl Fn(f64) -> f64) {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        let g = curve(i as f64);
        *slot = if g.is_nan() { 0 } else { g.clamp(0.0, 255.0) as u8 };
    }
    for v in image.pixels_mut() {
        *v = lut[usize::from(*v)];
    }
}
