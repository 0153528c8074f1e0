use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BitmapError;

/// Flat, top-down, 8-bit-per-channel image every transform operates on.
///
/// Pixels are stored row-major from the top row down: one byte per pixel
/// when grayscale, otherwise three bytes in blue, green, red order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalImage {
    width: u32,
    height: u32,
    grayscale: bool,
    pixels: Vec<u8>,
}

impl CanonicalImage {
    /// Wrap a single-channel buffer.
    pub fn from_gray(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        Self::from_parts(width, height, true, pixels)
    }

    /// Wrap a blue-green-red buffer.
    pub fn from_bgr(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        Self::from_parts(width, height, false, pixels)
    }

    fn from_parts(
        width: u32,
        height: u32,
        grayscale: bool,
        pixels: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        if pixels.is_empty() {
            return Err(BitmapError::NoData);
        }
        if width == 0 || height == 0 {
            return Err(BitmapError::CorruptData);
        }
        let channels = if grayscale { 1 } else { 3 };
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(channels))
            .ok_or(BitmapError::LimitExceeded)?;
        if pixels.len() != expected {
            return Err(BitmapError::CorruptData);
        }
        Ok(Self {
            width,
            height,
            grayscale,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_grayscale(&self) -> bool {
        self.grayscale
    }

    /// Bytes per pixel: 1 for grayscale, 3 for BGR.
    pub fn channels(&self) -> usize {
        if self.grayscale { 1 } else { 3 }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable samples for pointwise filters; the length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// One row of samples (`width * channels` bytes).
    pub fn row(&self, y: usize) -> &[u8] {
        let len = self.width as usize * self.channels();
        &self.pixels[y * len..(y + 1) * len]
    }

    /// Build from parts the caller has already sized correctly.
    pub(crate) fn assemble(width: u32, height: u32, grayscale: bool, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * if grayscale { 1 } else { 3 }
        );
        Self {
            width,
            height,
            grayscale,
            pixels,
        }
    }

    /// Swap in a freshly built buffer together with its dimensions and
    /// channel layout. The previous buffer is dropped here and nowhere else.
    pub(crate) fn replace(&mut self, width: u32, height: u32, grayscale: bool, pixels: Vec<u8>) {
        *self = Self::assemble(width, height, grayscale, pixels);
    }

    /// Reinterpret a color image as typed BGR pixels. `None` when grayscale.
    #[cfg(feature = "rgb")]
    pub fn as_bgr_pixels(&self) -> Option<&[rgb::alt::BGR8]> {
        if self.grayscale {
            return None;
        }
        Some(self.pixels.as_pixels())
    }

    /// Zero-copy 2D view of a grayscale image. `None` when color.
    #[cfg(feature = "imgref")]
    pub fn as_imgref_gray(&self) -> Option<imgref::ImgRef<'_, u8>> {
        if !self.grayscale {
            return None;
        }
        Some(imgref::ImgRef::new(
            &self.pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Zero-copy 2D view of a color image. `None` when grayscale.
    #[cfg(feature = "imgref")]
    pub fn as_imgref_bgr(&self) -> Option<imgref::ImgRef<'_, rgb::alt::BGR8>> {
        let pixels = self.as_bgr_pixels()?;
        Some(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
