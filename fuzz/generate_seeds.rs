#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

/// 54-byte header followed by `palette` and `pixels`.
fn bmp(width: i32, height: i32, bpp: u16, compression: u32, palette: &[u8], pixels: &[u8]) -> Vec<u8> {
    let offset = 54 + palette.len() as u32;
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + pixels.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out[30..34].copy_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(palette);
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit, bottom-up
    fs::write(format!("{dir}/bgr_1x1.bmp"), bmp(1, 1, 24, 0, &[], &[0xff, 0x00, 0x00, 0x00])).unwrap();

    // 2x2 1-bit, top-down, black/white palette
    let bw = [0, 0, 0, 0, 0xff, 0xff, 0xff, 0];
    let rows = [0x80, 0, 0, 0, 0x40, 0, 0, 0];
    fs::write(format!("{dir}/mono_2x2_topdown.bmp"), bmp(2, -2, 1, 0, &bw, &rows)).unwrap();

    // 3x1 4-bit, colored 16-entry palette
    let palette: Vec<u8> = (0..16u8).flat_map(|i| [i * 16, 255 - i * 16, i, 0]).collect();
    fs::write(format!("{dir}/nibble_3x1.bmp"), bmp(3, 1, 4, 0, &palette, &[0x1f, 0x80, 0, 0])).unwrap();

    // 2x1 8-bit, gray palette
    let gray: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i, 0]).collect();
    fs::write(format!("{dir}/gray_2x1.bmp"), bmp(2, 1, 8, 0, &gray, &[10, 200, 0, 0])).unwrap();

    // 1x2 32-bit with bitfields
    let quads = [1, 2, 3, 0xff, 4, 5, 6, 0x00];
    fs::write(format!("{dir}/bgrx_1x2_bitfields.bmp"), bmp(1, 2, 32, 3, &[], &quads)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/rle8.bin"), bmp(1, 1, 8, 1, &gray, &[0, 0, 0, 0])).unwrap();
    fs::write(format!("{dir}/bgr555.bin"), bmp(1, 1, 16, 0, &[], &[0, 0, 0, 0])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
