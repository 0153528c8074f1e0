//! BMP writer: `BITMAPINFOHEADER`, optional palette, packed rows.

use alloc::vec::Vec;

use enough::Stop;

use super::{FILE_HEADER_LEN, INFO_HEADER_LEN, RowOrder};
use crate::error::BitmapError;
use crate::record::RawImageRecord;

/// 72 DPI expressed in pixels per meter.
const PIXELS_PER_METER: i32 = 2835;

/// Serialize `record` with rows in `order`.
pub(crate) fn encode_bmp(
    record: &RawImageRecord,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let width = record.abs_width();
    let height = record.abs_height();
    let h = height as usize;
    let stride = record.stride();

    let palette = record.palette().unwrap_or(&[]);
    let palette_size = palette.len() * 4;
    let pixel_data_size = stride.checked_mul(h).ok_or(BitmapError::LimitExceeded)?;
    let data_offset = FILE_HEADER_LEN + INFO_HEADER_LEN as usize + palette_size;
    let file_size = data_offset
        .checked_add(pixel_data_size)
        .ok_or(BitmapError::LimitExceeded)?;

    let signed_height = i32::try_from(height).map_err(|_| BitmapError::LimitExceeded)?;
    let signed_height = match order {
        RowOrder::BottomUp => signed_height,
        RowOrder::TopDown => -signed_height,
    };

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(
        &mut out,
        BmpLayout {
            file_size: to_u32(file_size)?,
            data_offset: to_u32(data_offset)?,
            pixel_data_size: to_u32(pixel_data_size)?,
            width: i32::try_from(width).map_err(|_| BitmapError::LimitExceeded)?,
            height: signed_height,
            bits: record.depth().bits(),
        },
    );

    for entry in palette {
        out.extend_from_slice(&[entry.blue, entry.green, entry.red, entry.reserved]);
    }

    for i in 0..h {
        if i % 16 == 0 {
            stop.check()?;
        }
        let y = match order {
            RowOrder::TopDown => i,
            RowOrder::BottomUp => h - 1 - i,
        };
        out.extend_from_slice(record.row(y));
    }

    log::debug!(
        "wrote {}x{} {}-bit BMP ({:?}), {} bytes",
        width,
        height,
        record.depth().bits(),
        order,
        out.len()
    );

    Ok(out)
}

struct BmpLayout {
    file_size: u32,
    data_offset: u32,
    pixel_data_size: u32,
    width: i32,
    height: i32,
    bits: u16,
}

fn write_bmp_header(out: &mut Vec<u8>, layout: BmpLayout) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&layout.file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&layout.data_offset.to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&layout.width.to_le_bytes());
    out.extend_from_slice(&layout.height.to_le_bytes()); // negative = top-down
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&layout.bits.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&layout.pixel_data_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used: all
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

fn to_u32(n: usize) -> Result<u32, BitmapError> {
    u32::try_from(n).map_err(|_| BitmapError::LimitExceeded)
}
