//! BMP reader: header parsing and packed row extraction.
//!
//! Every multi-byte field is rebuilt with `from_le_bytes`, so the same code
//! reads correctly on little- and big-endian hosts.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::{BmpInfo, FILE_HEADER_LEN, INFO_HEADER_LEN};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::record::{BitDepth, PaletteEntry, RawImageRecord, row_stride};

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::CorruptData);
        }
        self.pos = pos;
        Ok(())
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::CorruptData)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::CorruptData)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

// ── Headers ─────────────────────────────────────────────────────────

/// The header fields the reader acts on.
pub(crate) struct BmpHeader {
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    pub height: i32,
    pub depth: BitDepth,
    pub colors_used: u32,
}

impl BmpHeader {
    pub fn info(&self) -> BmpInfo {
        BmpInfo {
            width: self.width.unsigned_abs(),
            height: self.height.unsigned_abs(),
            depth: self.depth,
            top_down: self.height < 0,
        }
    }
}

pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    let mut cur = Cursor::new(data);

    let magic = cur
        .read_fixed_bytes::<2>()
        .map_err(|_| BitmapError::NotRecognizedFormat)?;
    if u16::from_le_bytes(magic) != 0x4D42 {
        return Err(BitmapError::NotRecognizedFormat);
    }

    let _file_size = cur.get_u32_le()?;
    let _reserved1 = cur.get_u16_le()?;
    let _reserved2 = cur.get_u16_le()?;
    let data_offset = cur.get_u32_le()?;

    let info_size = cur.get_u32_le()?;
    if info_size < INFO_HEADER_LEN {
        // OS/2 core headers lay out width/height as u16
        return Err(BitmapError::NotRecognizedFormat);
    }
    let width = cur.get_i32_le()?;
    let height = cur.get_i32_le()?;
    let _planes = cur.get_u16_le()?;
    let bits = cur.get_u16_le()?;
    let compression = cur.get_u32_le()?;
    let _image_size = cur.get_u32_le()?;
    let _x_pixels_per_meter = cur.get_i32_le()?;
    let _y_pixels_per_meter = cur.get_i32_le()?;
    let colors_used = cur.get_u32_le()?;
    let _colors_important = cur.get_u32_le()?;

    let depth = BitDepth::try_from(bits)?;
    match compression {
        BI_RGB => {}
        BI_BITFIELDS if depth == BitDepth::ThirtyTwo => {}
        _ => return Err(BitmapError::UnsupportedCompression),
    }
    if width == 0 || height == 0 {
        return Err(BitmapError::CorruptData);
    }

    Ok(BmpHeader {
        data_offset,
        info_size,
        width,
        height,
        depth,
        colors_used,
    })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Read a BMP into a packed record, rows kept in file order.
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<RawImageRecord, BitmapError> {
    let header = parse_header(data)?;
    let width = header.width.unsigned_abs();
    let height = header.height.unsigned_abs();
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let stride = row_stride(width, header.depth);
    let pixel_bytes = stride
        .checked_mul(height as usize)
        .ok_or(BitmapError::LimitExceeded)?;
    if let Some(limits) = limits {
        limits.check_memory(pixel_bytes)?;
    }

    stop.check()?;

    let mut cur = Cursor::new(data);
    cur.set_position(FILE_HEADER_LEN + header.info_size as usize)?;

    let palette = match header.depth.palette_len() {
        Some(len) => Some(read_palette(&mut cur, len, header.colors_used)?),
        None => None,
    };

    // Trust the data offset only when it points past the palette.
    let offset = header.data_offset as usize;
    if offset >= cur.pos {
        cur.set_position(offset)?;
    }

    let mut rows = Vec::with_capacity(pixel_bytes);
    for row_idx in 0..height as usize {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        rows.extend_from_slice(cur.read_bytes(stride)?);
    }

    log::debug!(
        "read {}x{} {}-bit BMP ({}), {} palette entries",
        width,
        height,
        header.depth.bits(),
        if header.height < 0 { "top-down" } else { "bottom-up" },
        palette.as_ref().map_or(0, Vec::len)
    );

    RawImageRecord::new(header.width, header.height, header.depth, palette, rows)
}

/// Read `colors_used` entries (all `len` when zero or larger) and pad with
/// black up to `len`.
fn read_palette(
    cur: &mut Cursor<'_>,
    len: usize,
    colors_used: u32,
) -> Result<Vec<PaletteEntry>, BitmapError> {
    let count = match colors_used as usize {
        0 => len,
        n => n.min(len),
    };
    let mut palette = vec![PaletteEntry::default(); len];
    for entry in palette.iter_mut().take(count) {
        let [blue, green, red, reserved] = cur.read_fixed_bytes::<4>()?;
        *entry = PaletteEntry {
            blue,
            green,
            red,
            reserved,
        };
    }
    Ok(palette)
}
