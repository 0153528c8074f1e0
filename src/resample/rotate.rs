//! Clockwise rotation by an arbitrary angle.
//!
//! Exact quarter turns are pure index remaps. Every other angle maps each
//! output pixel center back into the source through the inverse rotation
//! and samples it with the chosen kernel; pixels that fall outside the
//! kernel's reach are painted with the caller's fill value.

use alloc::vec;
use alloc::vec::Vec;

use super::Interpolation;
use super::kernels::Source;
use crate::image::CanonicalImage;

/// How close an angle must be to a quarter turn to take the fast path.
const RIGHT_ANGLE_TOLERANCE: f64 = 1e-10;

/// Quarter-turn dispatch result for a normalized angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    None,
    Quarter,
    Half,
    ThreeQuarter,
    Arbitrary,
}

impl Turn {
    fn classify(degrees: f64) -> Self {
        let near = |target: f64| (degrees - target).abs() < RIGHT_ANGLE_TOLERANCE;
        if near(0.0) || near(360.0) {
            Self::None
        } else if near(90.0) {
            Self::Quarter
        } else if near(180.0) {
            Self::Half
        } else if near(270.0) {
            Self::ThreeQuarter
        } else {
            Self::Arbitrary
        }
    }
}

/// Rotate `image` clockwise by `degrees` in place.
///
/// `degrees` may be any finite value; it is reduced to `[0, 360)` first.
/// With `crop_to_content` the canvas takes the smaller of the rotated
/// corner spans on each axis, otherwise the larger one, so the whole
/// rotated footprint fits. Quarter turns ignore `algorithm`, `fill` and
/// `crop_to_content`.
pub fn rotate(
    image: &mut CanonicalImage,
    degrees: f64,
    algorithm: Interpolation,
    fill: u8,
    crop_to_content: bool,
) {
    let degrees = degrees.rem_euclid(360.0);
    let turn = Turn::classify(degrees);
    log::debug!(
        "rotate {}x{} by {degrees}° ({turn:?}, {algorithm:?})",
        image.width(),
        image.height()
    );
    match turn {
        Turn::None => {}
        Turn::Quarter => rotate_90(image),
        Turn::Half => rotate_180(image),
        Turn::ThreeQuarter => rotate_270(image),
        Turn::Arbitrary => rotate_arbitrary(image, degrees, algorithm, fill, crop_to_content),
    }
}

/// Output pixel `(x, y)` takes source pixel `(y, h - 1 - x)`.
fn rotate_90(image: &mut CanonicalImage) {
    let (w, h, ch) = dims(image);
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];
    for (y, row) in out.chunks_exact_mut(h * ch).enumerate() {
        for (x, px) in row.chunks_exact_mut(ch).enumerate() {
            let off = ((h - 1 - x) * w + y) * ch;
            px.copy_from_slice(&src[off..off + ch]);
        }
    }
    replace(image, h, w, out);
}

/// Both axes reversed, which is the pixel sequence read backwards.
fn rotate_180(image: &mut CanonicalImage) {
    let (w, h, ch) = dims(image);
    let mut out = Vec::with_capacity(image.pixels().len());
    for px in image.pixels().rchunks_exact(ch) {
        out.extend_from_slice(px);
    }
    replace(image, w, h, out);
}

/// Output pixel `(x, y)` takes source pixel `(w - 1 - y, x)`.
fn rotate_270(image: &mut CanonicalImage) {
    let (w, h, ch) = dims(image);
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];
    for (y, row) in out.chunks_exact_mut(h * ch).enumerate() {
        for (x, px) in row.chunks_exact_mut(ch).enumerate() {
            let off = (x * w + (w - 1 - y)) * ch;
            px.copy_from_slice(&src[off..off + ch]);
        }
    }
    replace(image, h, w, out);
}

fn rotate_arbitrary(
    image: &mut CanonicalImage,
    degrees: f64,
    algorithm: Interpolation,
    fill: u8,
    crop_to_content: bool,
) {
    let grayscale = image.is_grayscale();
    let src = Source::new(image);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (out_w, out_h) = canvas_size(src.width, src.height, sin, cos, crop_to_content);
    let ch = src.channels;

    // Offsets that align the canvas center with the source center, in
    // pixel-center coordinates.
    let half_out_w = out_w as f64 / 2.0;
    let half_out_h = out_h as f64 / 2.0;
    let half_src_w = src.width as f64 / 2.0;
    let half_src_h = src.height as f64 / 2.0;

    let mut out = vec![0u8; out_w * out_h * ch];
    for (y, row) in out.chunks_exact_mut(out_w * ch).enumerate() {
        let dy = y as f64 + 0.5 - half_out_h;
        for (x, px) in row.chunks_exact_mut(ch).enumerate() {
            let dx = x as f64 + 0.5 - half_out_w;
            let org_x = dx * cos + dy * sin + half_src_w - 0.5;
            let org_y = -dx * sin + dy * cos + half_src_h - 0.5;
            let hit = match algorithm {
                Interpolation::Nearest => src.sample_nearest(org_x, org_y, px),
                Interpolation::Bilinear => src.sample_bilinear(org_x, org_y, px),
                Interpolation::Cubic => src.sample_cubic(org_x, org_y, px),
            };
            if !hit {
                px.fill(fill);
            }
        }
    }

    image.replace(out_w as u32, out_h as u32, grayscale, out);
}

/// Canvas for a `width` × `height` image rotated by the angle whose sine
/// and cosine are given.
///
/// The four corners, taken relative to the image center, go through
/// `[cos, sin; -sin, cos]`. Each axis has two spans between opposite
/// corners; cropping keeps the smaller, expanding the larger. Spans are
/// rounded half-up and never drop below one pixel.
pub(crate) fn canvas_size(
    width: usize,
    height: usize,
    sin: f64,
    cos: f64,
    crop_to_content: bool,
) -> (usize, usize) {
    let (hw, hh) = (width as f64 / 2.0, height as f64 / 2.0);
    let rotated = |x: f64, y: f64| (x * cos + y * sin, -x * sin + y * cos);
    let top_left = rotated(-hw, -hh);
    let top_right = rotated(hw, -hh);
    let bottom_left = rotated(-hw, hh);
    let bottom_right = rotated(hw, hh);

    let span_x = [
        (bottom_right.0 - top_left.0).abs(),
        (top_right.0 - bottom_left.0).abs(),
    ];
    let span_y = [
        (bottom_right.1 - top_left.1).abs(),
        (top_right.1 - bottom_left.1).abs(),
    ];
    let pick = |s: [f64; 2]| {
        let span = if crop_to_content {
            s[0].min(s[1])
        } else {
            s[0].max(s[1])
        };
        ((span + 0.5) as usize).max(1)
    };
    (pick(span_x), pick(span_y))
}

fn dims(image: &CanonicalImage) -> (usize, usize, usize) {
    (
        image.width() as usize,
        image.height() as usize,
        image.channels(),
    )
}

fn replace(image: &mut CanonicalImage, width: usize, height: usize, pixels: Vec<u8>) {
    let grayscale = image.is_grayscale();
    image.replace(width as u32, height as u32, grayscale, pixels);
}
