use alloc::vec;

use super::Interpolation;
use super::kernels::Source;
use crate::image::CanonicalImage;

/// Resize `image` to `width` × `height` in place.
///
/// Target pixel `(x, y)` reads source coordinate `(x / ratio_x, y / ratio_y)`
/// with `ratio = target / current`. Bilinear and cubic fall back to the
/// pixel at the truncated coordinate near the right and bottom margins,
/// where their neighborhoods would run off the image. Nearest neighbor
/// picks the source pixel covering the target pixel's center, which always
/// lies inside the source; the 255 fill on a miss is a guard only.
///
/// Zooming to the current size leaves the buffer untouched. A zero target
/// dimension is ignored.
pub fn zoom(image: &mut CanonicalImage, width: u32, height: u32, algorithm: Interpolation) {
    if width == 0 || height == 0 {
        log::warn!("zoom to {width}x{height} ignored: target has no pixels");
        return;
    }
    if width == image.width() && height == image.height() {
        return;
    }

    let grayscale = image.is_grayscale();
    let src = Source::new(image);
    let ratio_x = f64::from(width) / src.width as f64;
    let ratio_y = f64::from(height) / src.height as f64;
    let ch = src.channels;
    let out_w = width as usize;

    log::debug!(
        "zoom {}x{} -> {}x{} ({:?})",
        src.width,
        src.height,
        width,
        height,
        algorithm
    );

    let mut out = vec![0u8; out_w * height as usize * ch];
    for (y, row) in out.chunks_exact_mut(out_w * ch).enumerate() {
        let src_y = y as f64 / ratio_y;
        for (x, px) in row.chunks_exact_mut(ch).enumerate() {
            let src_x = x as f64 / ratio_x;
            let hit = match algorithm {
                Interpolation::Nearest => {
                    // Map the target pixel's center, not its corner.
                    let cx = (x as f64 + 0.5) / ratio_x - 0.5;
                    let cy = (y as f64 + 0.5) / ratio_y - 0.5;
                    src.sample_nearest(cx, cy, px)
                }
                Interpolation::Bilinear => src.sample_bilinear(src_x, src_y, px),
                Interpolation::Cubic => src.sample_cubic(src_x, src_y, px),
            };
            if !hit {
                match algorithm {
                    // unreachable with center mapping
                    Interpolation::Nearest => px.fill(255),
                    Interpolation::Bilinear | Interpolation::Cubic => {
                        let u = (src_x as usize).min(src.width - 1);
                        let v = (src_y as usize).min(src.height - 1);
                        src.copy_pixel(u, v, px);
                    }
                }
            }
        }
    }

    image.replace(width, height, grayscale, out);
}
