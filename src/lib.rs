//! # zenraster
//!
//! Uncompressed BMP reading and writing, a canonical in-memory pixel
//! format, and geometric resampling (zoom and rotate) on top of it.
//!
//! ## Pipeline
//!
//! 1. [`decode_bmp`] / [`read_bmp_file`] produce a [`RawImageRecord`]: the
//!    packed rows, palette and signed dimensions exactly as stored.
//! 2. [`canonicalize`] turns that into a [`CanonicalImage`]: top-down,
//!    8 bits per channel, one channel when the picture is achromatic and
//!    blue-green-red otherwise.
//! 3. [`zoom`], [`rotate`] and the [`color`] filters work on the canonical
//!    image in place.
//! 4. [`reencode`] packs it back (8-bit gray palette or 24-bit) and
//!    [`encode_bmp`] / [`write_bmp_file`] serialize it.
//!
//! ## Supported input
//!
//! - 1, 4 and 8 bits per pixel with a palette
//! - 24 and 32 bits per pixel (the fourth byte is ignored)
//! - bottom-up (positive height) and top-down (negative height) row order
//!
//! ## Non-Goals
//!
//! - RLE and other compressed BMP variants
//! - 16 bits per pixel
//! - Alpha channels and color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenraster::{Interpolation, RowOrder, Unstoppable};
//!
//! let data = std::fs::read("photo.bmp").unwrap();
//!
//! // Probe without decoding
//! let info = zenraster::probe_bmp(&data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.depth);
//!
//! let record = zenraster::decode_bmp(&data, Unstoppable)?;
//! let mut image = zenraster::canonicalize(&record);
//!
//! zenraster::zoom(&mut image, 640, 480, Interpolation::Bilinear);
//! zenraster::rotate(&mut image, 30.0, Interpolation::Cubic, 255, false);
//!
//! let bytes = zenraster::encode_bmp(&zenraster::reencode(image), RowOrder::BottomUp, Unstoppable)?;
//! # let _ = bytes;
//! # Ok::<(), zenraster::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod canonical;
mod error;
mod image;
mod limits;
mod record;
mod reencode;
mod utils;

pub mod bmp;
pub mod color;
pub mod resample;

use alloc::vec::Vec;
use std::path::Path;

// Re-exports
pub use bmp::{BmpInfo, RowOrder};
pub use canonical::canonicalize;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use image::CanonicalImage;
pub use limits::Limits;
pub use record::{BitDepth, PaletteEntry, RawImageRecord, row_stride};
pub use reencode::reencode;
pub use resample::{Interpolation, rotate, zoom};

/// Parse a BMP from memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<RawImageRecord, BitmapError> {
    bmp::decode(data, None, &stop)
}

/// Parse a BMP from memory, rejecting images beyond `limits` before the
/// row buffer is allocated.
pub fn decode_bmp_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<RawImageRecord, BitmapError> {
    bmp::decode(data, Some(limits), &stop)
}

/// Read only the headers.
pub fn probe_bmp(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    bmp::probe(data)
}

/// Serialize a record as an uncompressed BMP.
pub fn encode_bmp(
    record: &RawImageRecord,
    order: RowOrder,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(record, order, &stop)
}

/// Read and parse a BMP file.
pub fn read_bmp_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<RawImageRecord, BitmapError> {
    bmp::read_file(path.as_ref(), &stop)
}

/// Serialize a record and write it to `path`, replacing any existing file.
pub fn write_bmp_file(
    path: impl AsRef<Path>,
    record: &RawImageRecord,
    order: RowOrder,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::write_file(path.as_ref(), record, order, &stop)
}

/// Read a BMP file straight into canonical form.
pub fn load(path: impl AsRef<Path>) -> Result<CanonicalImage, BitmapError> {
    let record = read_bmp_file(path, Unstoppable)?;
    Ok(canonicalize(&record))
}

/// Re-encode and write a canonical image as a bottom-up BMP.
pub fn save(path: impl AsRef<Path>, image: CanonicalImage) -> Result<(), BitmapError> {
    write_bmp_file(path, &reencode(image), RowOrder::BottomUp, Unstoppable)
}
