//! Packed palette-index expansion.

use crate::record::BitDepth;

/// Expand one packed row of palette indices into one index byte per pixel.
///
/// `out.len()` is the pixel count; trailing bits of the last input byte
/// past that count are ignored. 1-bit rows are read from the most
/// significant bit down, 4-bit rows high nibble first. Byte-sized depths
/// are copied through, truecolor depths leave `out` untouched.
pub(crate) fn expand_indices(depth: BitDepth, input: &[u8], out: &mut [u8]) {
    match depth {
        BitDepth::One => {
            let mut out_iter = out.chunks_exact_mut(8);
            let mut in_iter = input.iter();

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, &in_val)| {
                    for (pos, out_val) in out_vals.iter_mut().enumerate() {
                        *out_val = (in_val >> (7 - pos)) & 0x01;
                    }
                });

            if let Some(&in_val) = in_iter.next() {
                for (pos, out_val) in out_iter.into_remainder().iter_mut().enumerate() {
                    *out_val = (in_val >> (7 - pos)) & 0x01;
                }
            }
        }
        BitDepth::Four => {
            let mut out_iter = out.chunks_exact_mut(2);
            let mut in_iter = input.iter();

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, &in_val)| {
                    out_vals[0] = in_val >> 4;
                    out_vals[1] = in_val & 0x0f;
                });

            if let Some(&in_val) = in_iter.next() {
                if let Some(last) = out_iter.into_remainder().first_mut() {
                    *last = in_val >> 4;
                }
            }
        }
        BitDepth::Eight => {
            let n = out.len().min(input.len());
            out[..n].copy_from_slice(&input[..n]);
        }
        BitDepth::TwentyFour | BitDepth::ThirtyTwo => {}
    }
}
