use enough::{Stop, StopReason, Unstoppable};
use zenraster::*;

fn noise_pattern(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Packed rows for `width` × `height` at `depth`, filled with noise and
/// then zeroed past the last pixel of each row.
fn noise_rows(width: u32, height: u32, depth: BitDepth, seed: u32) -> Vec<u8> {
    let stride = row_stride(width, depth);
    let mut rows = noise_pattern(stride * height as usize, seed);
    let used = (width as usize * usize::from(depth.bits())).div_ceil(8);
    for row in rows.chunks_exact_mut(stride) {
        row[used..].fill(0);
    }
    rows
}

fn color_palette(len: usize) -> Vec<PaletteEntry> {
    (0..len)
        .map(|i| PaletteEntry::new(i as u8, (i * 7) as u8, (255 - i) as u8))
        .collect()
}

fn gray_palette(len: usize) -> Vec<PaletteEntry> {
    (0..len)
        .map(|i| PaletteEntry::gray((i * 255 / (len - 1)) as u8))
        .collect()
}

fn record(width: u32, height: i32, depth: BitDepth, seed: u32) -> RawImageRecord {
    let palette = depth.palette_len().map(color_palette);
    let rows = noise_rows(width, height.unsigned_abs(), depth, seed);
    RawImageRecord::new(width as i32, height, depth, palette, rows).unwrap()
}

struct AlreadyStopped;

impl Stop for AlreadyStopped {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

// ── Canonical round-trips ───────────────────────────────────────────

#[test]
fn every_depth_survives_reencode() {
    let depths = [
        BitDepth::One,
        BitDepth::Four,
        BitDepth::Eight,
        BitDepth::TwentyFour,
        BitDepth::ThirtyTwo,
    ];
    for (i, &depth) in depths.iter().enumerate() {
        for &(w, h) in &[(1u32, 1i32), (7, 5), (13, -4), (33, 9)] {
            let raw = record(w, h, depth, 0xDEAD_BEEF ^ i as u32);
            let first = canonicalize(&raw);
            assert_eq!(first.width(), w);
            assert_eq!(first.height(), h.unsigned_abs());

            let bytes = encode_bmp(&reencode(first.clone()), RowOrder::BottomUp, Unstoppable)
                .unwrap();
            let second = canonicalize(&decode_bmp(&bytes, Unstoppable).unwrap());
            assert_eq!(first, second, "{depth:?} {w}x{h}");
        }
    }
}

#[test]
fn row_order_does_not_change_pixels() {
    for depth in [BitDepth::Four, BitDepth::TwentyFour, BitDepth::ThirtyTwo] {
        let top_down = record(11, -6, depth, 0x1234_5678);
        let bottom_up = top_down.clone().into_row_order(false);
        assert!(top_down.is_top_down());
        assert!(!bottom_up.is_top_down());
        assert_ne!(top_down.rows(), bottom_up.rows());
        assert_eq!(canonicalize(&top_down), canonicalize(&bottom_up));
    }
}

#[test]
fn both_written_orders_decode_identically() {
    let raw = record(9, 7, BitDepth::TwentyFour, 42);
    let up = encode_bmp(&raw, RowOrder::BottomUp, Unstoppable).unwrap();
    let down = encode_bmp(&raw, RowOrder::TopDown, Unstoppable).unwrap();
    assert_ne!(up, down);

    let up = decode_bmp(&up, Unstoppable).unwrap();
    let down = decode_bmp(&down, Unstoppable).unwrap();
    assert_eq!(up.height(), 7);
    assert_eq!(down.height(), -7);
    assert_eq!(canonicalize(&up), canonicalize(&down));
    assert_eq!(canonicalize(&up), canonicalize(&raw));
}

#[test]
fn one_bit_rows_read_msb_first() {
    // 3 pixels: white, black, white → 0b101_00000
    let palette = vec![PaletteEntry::gray(0), PaletteEntry::gray(255)];
    let raw = RawImageRecord::new(3, -1, BitDepth::One, Some(palette), vec![0xA0, 0, 0, 0])
        .unwrap();
    let image = canonicalize(&raw);
    assert!(image.is_grayscale());
    assert_eq!(image.pixels(), &[255, 0, 255]);
}

#[test]
fn four_bit_rows_read_high_nibble_first() {
    let raw = RawImageRecord::new(
        3,
        -1,
        BitDepth::Four,
        Some(gray_palette(16)),
        vec![0x1F, 0x80, 0, 0],
    )
    .unwrap();
    assert_eq!(canonicalize(&raw).pixels(), &[17, 255, 136]);
}

#[test]
fn thirty_two_bit_ignores_fourth_byte() {
    let rows = vec![10, 20, 30, 0xFF, 10, 20, 30, 0x00];
    let raw = RawImageRecord::new(2, 1, BitDepth::ThirtyTwo, None, rows).unwrap();
    let image = canonicalize(&raw);
    assert!(!image.is_grayscale());
    assert_eq!(image.pixels(), &[10, 20, 30, 10, 20, 30]);
}

// ── Grayscale detection ─────────────────────────────────────────────

#[test]
fn achromatic_truecolor_collapses_to_gray() {
    let mut rows = Vec::new();
    for v in [0u8, 77, 200, 255] {
        rows.extend_from_slice(&[v, v, v]);
    }
    // 4 px * 3 = 12 bytes, already aligned
    let raw = RawImageRecord::new(4, -1, BitDepth::TwentyFour, None, rows).unwrap();
    let image = canonicalize(&raw);
    assert!(image.is_grayscale());
    assert_eq!(image.channels(), 1);
    assert_eq!(image.pixels(), &[0, 77, 200, 255]);

    let packed = reencode(image);
    assert_eq!(packed.depth(), BitDepth::Eight);
    assert_eq!(packed.palette().unwrap().len(), 256);
    assert_eq!(packed.palette().unwrap()[77], PaletteEntry::gray(77));
}

#[test]
fn one_chromatic_pixel_keeps_color() {
    let mut rows = vec![128u8; 4 * 3 * 2];
    // last pixel of the last stored row
    *rows.last_mut().unwrap() = 129;
    let raw = RawImageRecord::new(4, 2, BitDepth::TwentyFour, None, rows).unwrap();
    let image = canonicalize(&raw);
    assert!(!image.is_grayscale());
    assert_eq!(image.channels(), 3);

    let packed = reencode(image);
    assert_eq!(packed.depth(), BitDepth::TwentyFour);
    assert!(packed.palette().is_none());
}

#[test]
fn colored_palette_is_not_gray() {
    let raw = RawImageRecord::new(
        2,
        1,
        BitDepth::One,
        Some(color_palette(2)),
        vec![0x40, 0, 0, 0],
    )
    .unwrap();
    let image = canonicalize(&raw);
    assert!(!image.is_grayscale());
    // index 0 then index 1
    assert_eq!(image.pixels(), &[0, 0, 255, 1, 7, 254]);
}

// ── Header layout ───────────────────────────────────────────────────

#[test]
fn written_header_fields() {
    let image = CanonicalImage::from_gray(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let packed = reencode(image);
    assert!(packed.is_top_down());
    assert_eq!(packed.stride(), 4);

    let bytes = encode_bmp(&packed, RowOrder::BottomUp, Unstoppable).unwrap();
    let u32_at = |i: usize| u32::from_le_bytes(bytes[i..i + 4].try_into().unwrap());
    let i32_at = |i: usize| i32::from_le_bytes(bytes[i..i + 4].try_into().unwrap());

    assert_eq!(&bytes[..2], b"BM");
    assert_eq!(u32_at(2) as usize, bytes.len());
    assert_eq!(u32_at(10), 14 + 40 + 256 * 4);
    assert_eq!(u32_at(14), 40);
    assert_eq!(i32_at(18), 3);
    assert_eq!(i32_at(22), 2);
    assert_eq!(u16::from_le_bytes([bytes[28], bytes[29]]), 8);
    assert_eq!(u32_at(30), 0);
    assert_eq!(i32_at(38), 2835);
    assert_eq!(bytes.len(), 1078 + 2 * 4);
    // bottom row first, padded with zeros
    assert_eq!(&bytes[1078..1086], &[4, 5, 6, 0, 1, 2, 3, 0]);

    let top_down = encode_bmp(&packed, RowOrder::TopDown, Unstoppable).unwrap();
    assert_eq!(i32::from_le_bytes(top_down[22..26].try_into().unwrap()), -2);
    assert_eq!(&top_down[1078..1086], &[1, 2, 3, 0, 4, 5, 6, 0]);
}

#[test]
fn probe_reads_headers_only() {
    let bytes = encode_bmp(
        &record(17, 5, BitDepth::Four, 7),
        RowOrder::TopDown,
        Unstoppable,
    )
    .unwrap();
    let info = probe_bmp(&bytes[..54]).unwrap();
    assert_eq!(
        info,
        BmpInfo {
            width: 17,
            height: 5,
            depth: BitDepth::Four,
            top_down: true,
        }
    );
}

#[test]
fn short_palette_is_padded_with_black() {
    let mut bytes = encode_bmp(&record(4, 2, BitDepth::Eight, 3), RowOrder::TopDown, Unstoppable)
        .unwrap();
    // declare only two palette colors; the data offset still points past all 256
    bytes[46..50].copy_from_slice(&2u32.to_le_bytes());
    let raw = decode_bmp(&bytes, Unstoppable).unwrap();
    let palette = raw.palette().unwrap();
    assert_eq!(palette.len(), 256);
    assert_eq!(palette[1], color_palette(2)[1]);
    assert_eq!(palette[2], PaletteEntry::default());
    assert_eq!(palette[255], PaletteEntry::default());
}

// ── Errors ──────────────────────────────────────────────────────────

fn valid_bmp() -> Vec<u8> {
    encode_bmp(&record(5, 3, BitDepth::TwentyFour, 9), RowOrder::BottomUp, Unstoppable).unwrap()
}

#[test]
fn bad_magic_is_not_recognized() {
    let mut bytes = valid_bmp();
    bytes[0] = b'P';
    assert_eq!(decode_bmp(&bytes, Unstoppable), Err(BitmapError::NotRecognizedFormat));
    assert_eq!(decode_bmp(&[], Unstoppable), Err(BitmapError::NotRecognizedFormat));
    assert_eq!(probe_bmp(b"B"), Err(BitmapError::NotRecognizedFormat));
}

#[test]
fn core_header_is_not_recognized() {
    let mut bytes = valid_bmp();
    bytes[14..18].copy_from_slice(&12u32.to_le_bytes());
    assert_eq!(decode_bmp(&bytes, Unstoppable), Err(BitmapError::NotRecognizedFormat));
}

#[test]
fn truncation_is_corrupt() {
    let bytes = valid_bmp();
    for cut in [20, 53, bytes.len() - 1] {
        assert_eq!(
            decode_bmp(&bytes[..cut], Unstoppable),
            Err(BitmapError::CorruptData),
            "cut at {cut}"
        );
    }
}

#[test]
fn sixteen_bit_is_unsupported() {
    let mut bytes = valid_bmp();
    bytes[28..30].copy_from_slice(&16u16.to_le_bytes());
    assert_eq!(decode_bmp(&bytes, Unstoppable), Err(BitmapError::UnsupportedDepth));
    assert_eq!(BitDepth::try_from(16u16), Err(BitmapError::UnsupportedDepth));
}

#[test]
fn rle_is_unsupported() {
    let mut bytes = valid_bmp();
    bytes[30..34].copy_from_slice(&1u32.to_le_bytes());
    assert_eq!(decode_bmp(&bytes, Unstoppable), Err(BitmapError::UnsupportedCompression));
    // bitfields only make sense for 32 bpp here
    bytes[30..34].copy_from_slice(&3u32.to_le_bytes());
    assert_eq!(decode_bmp(&bytes, Unstoppable), Err(BitmapError::UnsupportedCompression));
}

#[test]
fn zero_dimension_is_corrupt() {
    let mut bytes = valid_bmp();
    bytes[18..22].copy_from_slice(&0i32.to_le_bytes());
    assert_eq!(decode_bmp(&bytes, Unstoppable), Err(BitmapError::CorruptData));
}

#[test]
fn limits_reject_large() {
    let bytes = valid_bmp();
    let narrow = Limits {
        max_width: Some(4),
        ..Default::default()
    };
    assert_eq!(
        decode_bmp_with_limits(&bytes, &narrow, Unstoppable),
        Err(BitmapError::LimitExceeded)
    );
    let small = Limits {
        max_memory_bytes: Some(10),
        ..Default::default()
    };
    assert_eq!(
        decode_bmp_with_limits(&bytes, &small, Unstoppable),
        Err(BitmapError::LimitExceeded)
    );
    let roomy = Limits {
        max_pixels: Some(15),
        ..Default::default()
    };
    assert!(decode_bmp_with_limits(&bytes, &roomy, Unstoppable).is_ok());
}

#[test]
fn cancellation_is_reported() {
    let bytes = valid_bmp();
    assert_eq!(decode_bmp(&bytes, AlreadyStopped), Err(BitmapError::Cancelled));
    let raw = decode_bmp(&bytes, Unstoppable).unwrap();
    assert_eq!(
        encode_bmp(&raw, RowOrder::TopDown, AlreadyStopped),
        Err(BitmapError::Cancelled)
    );
}

#[test]
fn record_construction_is_checked() {
    assert_eq!(
        RawImageRecord::new(0, 1, BitDepth::TwentyFour, None, vec![0; 4]),
        Err(BitmapError::CorruptData)
    );
    // palette missing
    assert_eq!(
        RawImageRecord::new(1, 1, BitDepth::Eight, None, vec![0; 4]),
        Err(BitmapError::CorruptData)
    );
    // palette on truecolor
    assert_eq!(
        RawImageRecord::new(1, 1, BitDepth::TwentyFour, Some(color_palette(2)), vec![0; 4]),
        Err(BitmapError::CorruptData)
    );
    // rows short by one byte
    assert_eq!(
        RawImageRecord::new(2, 2, BitDepth::TwentyFour, None, vec![0; 15]),
        Err(BitmapError::CorruptData)
    );
    let trimmed = RawImageRecord::new(2, 2, BitDepth::TwentyFour, None, vec![0; 20]).unwrap();
    assert_eq!(trimmed.rows().len(), 16);
}

#[test]
fn canonical_construction_is_checked() {
    assert_eq!(CanonicalImage::from_gray(2, 2, Vec::new()), Err(BitmapError::NoData));
    assert_eq!(CanonicalImage::from_bgr(2, 2, vec![0; 11]), Err(BitmapError::CorruptData));
    assert_eq!(CanonicalImage::from_gray(0, 2, vec![0; 2]), Err(BitmapError::CorruptData));
}

#[test]
fn error_codes_are_distinct() {
    let all = [
        BitmapError::InvalidPath,
        BitmapError::NotRecognizedFormat,
        BitmapError::NoData,
        BitmapError::CorruptData,
        BitmapError::WriteFailure,
        BitmapError::UnsupportedDepth,
        BitmapError::UnsupportedCompression,
        BitmapError::LimitExceeded,
        BitmapError::Cancelled,
    ];
    assert_eq!(BitmapError::InvalidPath.code(), 0x0001_0001);
    assert_eq!(BitmapError::CorruptData.code(), 0x0001_0004);
    for (i, a) in all.iter().enumerate() {
        assert_eq!(a.code() >> 16, 1);
        for b in &all[i + 1..] {
            assert_ne!(a.code(), b.code());
        }
    }
}

// ── Files ───────────────────────────────────────────────────────────

#[test]
fn file_roundtrip_both_orders() {
    let dir = tempfile::tempdir().unwrap();
    let raw = record(6, 4, BitDepth::Eight, 0xC0FFEE);
    for order in [RowOrder::BottomUp, RowOrder::TopDown] {
        let path = dir.path().join(format!("{order:?}.bmp"));
        write_bmp_file(&path, &raw, order, Unstoppable).unwrap();
        let back = read_bmp_file(&path, Unstoppable).unwrap();
        assert_eq!(back.is_top_down(), order == RowOrder::TopDown);
        assert_eq!(canonicalize(&back), canonicalize(&raw));
    }
}

#[test]
fn load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.bmp");
    let image = CanonicalImage::from_bgr(5, 5, noise_pattern(75, 0xBEEF)).unwrap();
    save(&path, image.clone()).unwrap();
    assert_eq!(load(&path).unwrap(), image);
    assert!(!probe_bmp(&std::fs::read(&path).unwrap()).unwrap().top_down);
}

#[test]
fn missing_file_is_invalid_path() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        read_bmp_file(dir.path().join("absent.bmp"), Unstoppable),
        Err(BitmapError::InvalidPath)
    );
    let image = CanonicalImage::from_gray(1, 1, vec![9]).unwrap();
    assert_eq!(
        save(dir.path().join("no/such/dir.bmp"), image),
        Err(BitmapError::InvalidPath)
    );
}

// ── Typed views ─────────────────────────────────────────────────────

#[cfg(feature = "imgref")]
#[test]
fn typed_views_borrow_the_buffer() {
    let image = CanonicalImage::from_bgr(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let bgr = image.as_bgr_pixels().unwrap();
    assert_eq!((bgr[1].b, bgr[1].g, bgr[1].r), (4, 5, 6));
    let view = image.as_imgref_bgr().unwrap();
    assert_eq!((view.width(), view.height()), (2, 1));
    assert!(image.as_imgref_gray().is_none());

    let gray = CanonicalImage::from_gray(3, 1, vec![7, 8, 9]).unwrap();
    assert!(gray.as_bgr_pixels().is_none());
    assert_eq!(gray.as_imgref_gray().unwrap().buf(), &[7, 8, 9]);
}
