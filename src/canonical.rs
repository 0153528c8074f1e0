//! Packed record → canonical image.

use alloc::vec;
use alloc::vec::Vec;

use crate::image::CanonicalImage;
use crate::record::{BitDepth, RawImageRecord};
use crate::utils::expand_indices;

/// Unpack a record into a top-down BGR buffer, collapsing to one channel
/// when every pixel has equal blue, green and red.
///
/// Infallible: [`RawImageRecord::new`] already guaranteed a supported
/// depth, a full palette for indexed depths and enough row bytes.
pub fn canonicalize(raw: &RawImageRecord) -> CanonicalImage {
    let w = raw.abs_width() as usize;
    let h = raw.abs_height() as usize;
    let depth = raw.depth();
    let palette = raw.palette().unwrap_or_default();

    let mut bgr = vec![0u8; w * h * 3];
    let mut indices = vec![0u8; if depth.is_indexed() { w } else { 0 }];
    let mut achromatic = true;

    for (y, out_row) in bgr.chunks_exact_mut(w * 3).enumerate() {
        let src = raw.row(y);
        match depth {
            BitDepth::One | BitDepth::Four | BitDepth::Eight => {
                expand_indices(depth, src, &mut indices);
                for (px, &idx) in out_row.chunks_exact_mut(3).zip(&indices) {
                    let entry = palette[usize::from(idx)];
                    px[0] = entry.blue;
                    px[1] = entry.green;
                    px[2] = entry.red;
                }
            }
            BitDepth::TwentyFour => out_row.copy_from_slice(&src[..w * 3]),
            BitDepth::ThirtyTwo => {
                for (px, quad) in out_row.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
                    px.copy_from_slice(&quad[..3]);
                }
            }
        }
        if achromatic {
            achromatic = out_row
                .chunks_exact(3)
                .all(|px| px[0] == px[1] && px[1] == px[2]);
        }
    }

    log::debug!(
        "canonicalized {}x{} {}-bit {} record, grayscale={}",
        w,
        h,
        depth.bits(),
        if raw.is_top_down() { "top-down" } else { "bottom-up" },
        achromatic
    );

    if achromatic {
        let gray: Vec<u8> = bgr.chunks_exact(3).map(|px| px[0]).collect();
        CanonicalImage::assemble(w as u32, h as u32, true, gray)
    } else {
        CanonicalImage::assemble(w as u32, h as u32, false, bgr)
    }
}
