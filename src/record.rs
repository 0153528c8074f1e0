//! Packed, on-disk-shaped image record.
//!
//! A [`RawImageRecord`] is what the BMP reader produces and the writer
//! consumes: signed dimensions, a bit depth, an optional palette and the
//! padded row bytes exactly as they sit in the file.

use alloc::vec::Vec;

use crate::error::BitmapError;

/// Supported packed bit depths.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel, 2-entry palette.
    One,
    /// 4 bits per pixel, 16-entry palette.
    Four,
    /// 8 bits per pixel, 256-entry palette.
    Eight,
    /// Blue, green, red bytes.
    TwentyFour,
    /// Blue, green, red, then an ignored padding/alpha byte.
    ThirtyTwo,
}

impl BitDepth {
    /// Bits per pixel as stored in the info header.
    pub fn bits(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::TwentyFour => 24,
            Self::ThirtyTwo => 32,
        }
    }

    /// Whether pixels are palette indices.
    pub fn is_indexed(self) -> bool {
        matches!(self, Self::One | Self::Four | Self::Eight)
    }

    /// Number of palette entries an indexed depth addresses (`2^bits`).
    pub fn palette_len(self) -> Option<usize> {
        self.is_indexed().then(|| 1usize << self.bits())
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = BitmapError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Self::One),
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            24 => Ok(Self::TwentyFour),
            32 => Ok(Self::ThirtyTwo),
            _ => Err(BitmapError::UnsupportedDepth),
        }
    }
}

/// One palette slot, in file order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl PaletteEntry {
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }

    /// Achromatic entry with all three channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

/// Bytes per packed row, padded to a 4-byte boundary.
pub fn row_stride(width: u32, depth: BitDepth) -> usize {
    (width as usize * usize::from(depth.bits())).div_ceil(32) * 4
}

/// Packed image as read from, or about to be written to, a BMP file.
///
/// A positive height means rows are stored bottom-to-top; a negative
/// height means top-to-bottom. Width is used by absolute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawImageRecord {
    width: i32,
    height: i32,
    depth: BitDepth,
    palette: Option<Vec<PaletteEntry>>,
    rows: Vec<u8>,
}

impl RawImageRecord {
    /// Build a record, checking the palette and row buffer against the
    /// declared geometry.
    ///
    /// Indexed depths need exactly `2^bits` palette entries; truecolor depths
    /// must not carry a palette. `rows` must hold at least
    /// `row_stride * |height|` bytes; anything past that is dropped.
    pub fn new(
        width: i32,
        height: i32,
        depth: BitDepth,
        palette: Option<Vec<PaletteEntry>>,
        mut rows: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::CorruptData);
        }
        match (&palette, depth.palette_len()) {
            (Some(entries), Some(len)) if entries.len() == len => {}
            (None, None) => {}
            _ => return Err(BitmapError::CorruptData),
        }
        let needed = row_stride(width.unsigned_abs(), depth)
            .checked_mul(height.unsigned_abs() as usize)
            .ok_or(BitmapError::LimitExceeded)?;
        if rows.len() < needed {
            return Err(BitmapError::CorruptData);
        }
        rows.truncate(needed);
        Ok(Self {
            width,
            height,
            depth,
            palette,
            rows,
        })
    }

    /// Build from parts already known to satisfy the invariants of [`Self::new`].
    pub(crate) fn assemble(
        width: i32,
        height: i32,
        depth: BitDepth,
        palette: Option<Vec<PaletteEntry>>,
        rows: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            rows.len(),
            row_stride(width.unsigned_abs(), depth) * height.unsigned_abs() as usize
        );
        Self {
            width,
            height,
            depth,
            palette,
            rows,
        }
    }

    /// Signed width as declared.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Signed height as declared (negative = top-down).
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pixel columns.
    pub fn abs_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Pixel rows.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        self.palette.as_deref()
    }

    /// All packed rows in storage order, padding included.
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    /// Padded byte length of one row.
    pub fn stride(&self) -> usize {
        row_stride(self.abs_width(), self.depth)
    }

    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Packed bytes (padding included) of logical row `y`, where 0 is the
    /// top of the picture regardless of storage order.
    pub fn row(&self, y: usize) -> &[u8] {
        let h = self.abs_height() as usize;
        let stored = if self.is_top_down() { y } else { h - 1 - y };
        let stride = self.stride();
        &self.rows[stored * stride..(stored + 1) * stride]
    }

    /// Re-store the rows in the requested order, flipping the height sign
    /// and the row sequence when it differs from the current one.
    pub fn into_row_order(mut self, top_down: bool) -> Self {
        if self.is_top_down() == top_down {
            return self;
        }
        let stride = self.stride();
        let mut flipped = Vec::with_capacity(self.rows.len());
        for row in self.rows.rchunks_exact(stride) {
            flipped.extend_from_slice(row);
        }
        self.rows = flipped;
        self.height = -self.height;
        self
    }
}
