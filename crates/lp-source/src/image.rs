use std::path::Path;

use anyhow::{Context, Result};
use lp_core::frame::FrameBuffer;

/// Load a still image from disk into an RGBA frame.
///
/// Container format is inferred from the file contents (PNG, JPEG, BMP,
/// or the first frame of a GIF).
///
/// # Errors
/// Returns an error if the file is unreadable or malformed; nothing is
/// partially produced.
///
/// # Example
/// ```no_run
/// use lp_source::image::load_still;
/// use std::path::Path;
/// let frame = load_still(Path::new("input.png")).unwrap();
/// ```
pub fn load_still(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path).with_context(|| format!("cannot load {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("loaded {} ({width}×{height})", path.display());
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}
