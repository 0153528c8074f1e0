use enough::StopReason;

/// Errors from BMP reading, writing and canonicalization.
///
/// Every variant is a bare kind. Geometric and color transforms never fail;
/// everything here originates at the file boundary or at record construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("file cannot be opened")]
    InvalidPath,

    #[error("not a BMP file (magic bytes mismatch)")]
    NotRecognizedFormat,

    #[error("header, palette or pixel data shorter than declared")]
    CorruptData,

    #[error("no pixel data to encode")]
    NoData,

    #[error("output stream accepted fewer bytes than requested")]
    WriteFailure,

    #[error("unsupported bit depth (expected 1, 4, 8, 24 or 32 bits per pixel)")]
    UnsupportedDepth,

    #[error("compressed BMP variants are not supported")]
    UnsupportedCompression,

    #[error("image exceeds configured limits")]
    LimitExceeded,

    #[error("operation cancelled")]
    Cancelled,
}

impl BitmapError {
    /// Numeric error code: area in the high 16 bits, error in the low 16.
    pub fn code(self) -> u32 {
        match self {
            Self::InvalidPath => 0x0001_0001,
            Self::NotRecognizedFormat => 0x0001_0002,
            Self::NoData => 0x0001_0003,
            Self::CorruptData => 0x0001_0004,
            Self::WriteFailure => 0x0001_0005,
            Self::UnsupportedDepth => 0x0001_0006,
            Self::UnsupportedCompression => 0x0001_0007,
            Self::LimitExceeded => 0x0001_0008,
            Self::Cancelled => 0x0001_0009,
        }
    }
}

impl From<StopReason> for BitmapError {
    fn from(_: StopReason) -> Self {
        BitmapError::Cancelled
    }
}
