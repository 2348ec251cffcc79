use lp_core::frame::{FrameBuffer, GrayBuffer};

/// Perceptual grayscale intensity of one RGB sample,
/// `round(0.299·R + 0.587·G + 0.114·B)` in integer arithmetic.
///
/// # Example
/// ```
/// use lp_mosaic::luminance::luma;
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500) / 1000) as u8
}

/// Convert a color frame to a single-channel intensity buffer.
///
/// Each pixel is first composited over a white background by its alpha,
/// so transparent regions read as paper rather than ink, then reduced
/// with [`luma`].
///
/// # Example
/// ```
/// use lp_core::frame::FrameBuffer;
/// use lp_mosaic::luminance::to_gray;
///
/// // A fully transparent frame grays to pure white.
/// let frame = FrameBuffer::new(2, 2);
/// let gray = to_gray(&frame);
/// assert!(gray.data.iter().all(|&v| v == 255));
/// ```
#[must_use]
pub fn to_gray(frame: &FrameBuffer) -> GrayBuffer {
    let mut gray = GrayBuffer::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let (r, g, b, a) = frame.pixel(x, y);
            let a = u32::from(a);
            let over_white = |c: u8| ((u32::from(c) * a + 255 * (255 - a)) / 255) as u8;
            gray.set(x, y, luma(over_white(r), over_white(g), over_white(b)));
        }
    }
    gray
}
