use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use lp_core::frame::FrameBuffer;

/// Write a frame to disk; the container format follows the extension
/// (PNG, JPEG, BMP).
///
/// The mosaic output is opaque, so the alpha channel is discarded before
/// encoding — JPEG in particular has no use for it.
///
/// # Errors
/// Returns an error for an unrecognized extension or an unwritable
/// destination; a failed write leaves no usable output.
pub fn save_still(path: &Path, frame: &FrameBuffer) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .context("frame buffer does not match its dimensions")?;
    DynamicImage::ImageRgba8(image)
        .to_rgb8()
        .save(path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    log::info!("wrote {} ({}×{})", path.display(), frame.width, frame.height);
    Ok(())
}
