//! Geometric resampling of a [`CanonicalImage`](crate::CanonicalImage):
//! zoom to a size, rotate by an angle.
//!
//! Both operate in place, replace the pixel buffer and dimensions in one
//! step, and leave the grayscale flag alone. Each channel is interpolated
//! independently.

mod kernels;
mod rotate;
mod zoom;

pub use rotate::rotate;
pub use zoom::zoom;

/// Interpolation strategy, fastest first.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Interpolation {
    /// Copy the closest source pixel.
    #[default]
    Nearest,
    /// Weighted average of the surrounding 2×2 pixels.
    Bilinear,
    /// Cubic convolution over the surrounding 4×4 pixels.
    Cubic,
}
