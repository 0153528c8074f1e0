use crate::error::BitmapError;

/// Resource limits applied while reading a BMP.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the packed row allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                log::debug!("width {width} exceeds limit {max_w}");
                return Err(BitmapError::LimitExceeded);
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                log::debug!("height {height} exceeds limit {max_h}");
                return Err(BitmapError::LimitExceeded);
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                log::debug!("pixel count {pixels} exceeds limit {max_px}");
                return Err(BitmapError::LimitExceeded);
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                log::debug!("allocation {bytes} bytes exceeds memory limit {max_mem}");
                return Err(BitmapError::LimitExceeded);
            }
        }
        Ok(())
    }
}
