//! Canonical image → packed record.

use alloc::vec;
use alloc::vec::Vec;

use crate::image::CanonicalImage;
use crate::record::{BitDepth, PaletteEntry, RawImageRecord, row_stride};

/// Pack a canonical image: 8-bit indexed with an identity gray palette
/// when grayscale, 24-bit BGR otherwise.
///
/// Rows come out top-down (negative height); the writer picks the on-disk
/// order. Padding bytes are zero.
pub fn reencode(image: CanonicalImage) -> RawImageRecord {
    let width = image.width();
    let height = image.height();
    let grayscale = image.is_grayscale();
    let (depth, palette) = if grayscale {
        let palette: Vec<PaletteEntry> = (0..=255u8).map(PaletteEntry::gray).collect();
        (BitDepth::Eight, Some(palette))
    } else {
        (BitDepth::TwentyFour, None)
    };

    let stride = row_stride(width, depth);
    let row_len = width as usize * image.channels();
    let pixels = image.into_pixels();

    let mut rows = vec![0u8; stride * height as usize];
    for (dst, src) in rows
        .chunks_exact_mut(stride)
        .zip(pixels.chunks_exact(row_len))
    {
        dst[..row_len].copy_from_slice(src);
    }

    log::debug!(
        "re-encoded {}x{} image as {}-bit record",
        width,
        height,
        depth.bits()
    );

    RawImageRecord::assemble(width as i32, -(height as i32), depth, palette, rows)
}
