//! Uncompressed BMP reading and writing (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`],
//! [`crate::read_bmp_file`], etc.

mod decode;
mod encode;

use alloc::vec::Vec;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use enough::Stop;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::record::{BitDepth, RawImageRecord};

pub(crate) const FILE_HEADER_LEN: usize = 14;
pub(crate) const INFO_HEADER_LEN: u32 = 40;

/// Row order of the pixel data in a written file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Positive height, last picture row first.
    #[default]
    BottomUp,
    /// Negative height, first picture row first.
    TopDown,
}

/// Header summary returned by [`crate::probe_bmp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub depth: BitDepth,
    /// Rows are stored top-to-bottom (negative height in the header).
    pub top_down: bool,
}

pub(crate) fn probe(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    Ok(decode::parse_header(data)?.info())
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<RawImageRecord, BitmapError> {
    decode::decode_bmp(data, limits, stop)
}

pub(crate) fn encode(
    record: &RawImageRecord,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(record, order, stop)
}

pub(crate) fn read_file(path: &Path, stop: &dyn Stop) -> Result<RawImageRecord, BitmapError> {
    let mut file = File::open(path).map_err(|e| {
        log::debug!("cannot open {}: {e}", path.display());
        BitmapError::InvalidPath
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(|e| {
        log::debug!("read of {} failed: {e}", path.display());
        BitmapError::CorruptData
    })?;
    decode(&data, None, stop)
}

pub(crate) fn write_file(
    path: &Path,
    record: &RawImageRecord,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    // Encode before touching the file system so a cancelled write leaves
    // nothing behind.
    let bytes = encode(record, order, stop)?;
    let mut file = File::create(path).map_err(|e| {
        log::debug!("cannot create {}: {e}", path.display());
        BitmapError::InvalidPath
    })?;
    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|e| {
            log::debug!("write to {} failed: {e}", path.display());
            BitmapError::WriteFailure
        })
}
