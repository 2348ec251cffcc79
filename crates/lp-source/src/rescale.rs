use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use lp_core::frame::GrayBuffer;

/// Upscale a gray plane by `factor`, rounding the output dimensions.
///
/// Used on animated sources whose pixel count falls short of the
/// configured target, so the glyph grid does not collapse to a handful
/// of cells. A factor of 1.0 (or a rounding no-op) returns a copy.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use lp_core::frame::GrayBuffer;
/// use lp_source::rescale::upscale_gray;
///
/// let src = GrayBuffer::new(10, 5);
/// let dst = upscale_gray(&src, 2.0).unwrap();
/// assert_eq!((dst.width, dst.height), (20, 10));
/// ```
pub fn upscale_gray(src: &GrayBuffer, factor: f32) -> Result<GrayBuffer> {
    let new_w = (factor * src.width as f32).round() as u32;
    let new_h = (factor * src.height as f32).round() as u32;
    if new_w == src.width && new_h == src.height {
        return Ok(src.clone());
    }

    // Forced copy: fast_image_resize requires a mutable source slice.
    let mut src_buf = src.data.clone();
    let src_image = Image::from_slice_u8(src.width, src.height, &mut src_buf, PixelType::U8)
        .context("invalid source dimensions")?;

    let mut dst = GrayBuffer::new(new_w, new_h);
    let mut dst_image = Image::from_slice_u8(new_w, new_h, &mut dst.data, PixelType::U8)
        .context("invalid destination dimensions")?;

    Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&ResizeOptions::new()))
        .context("resize failed")?;

    Ok(dst)
}
