use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use lp_core::frame::{LoopBehavior, SequenceFrame};

/// Encode rendered frames as an animated GIF.
///
/// Per-frame delays (milliseconds) and the sequence's loop behavior are
/// passed through; `speed` is the encoder's quality/speed trade-off in
/// 1–30, lower being slower and higher quality.
///
/// # Errors
/// Returns an error if the destination is unwritable or a frame fails to
/// encode. A partially written file is invalid and should be discarded.
pub fn encode_animation(
    path: &Path,
    frames: &[SequenceFrame],
    looping: LoopBehavior,
    speed: i32,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), speed);
    encoder
        .set_repeat(match looping {
            LoopBehavior::Infinite => Repeat::Infinite,
            LoopBehavior::Finite(n) => Repeat::Finite(n),
        })
        .with_context(|| format!("cannot start GIF stream {}", path.display()))?;

    for (index, sf) in frames.iter().enumerate() {
        let image = RgbaImage::from_raw(sf.frame.width, sf.frame.height, sf.frame.data.clone())
            .context("frame buffer does not match its dimensions")?;
        let frame = Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(sf.delay_ms, 1));
        encoder
            .encode_frame(frame)
            .with_context(|| format!("cannot encode frame {index} into {}", path.display()))?;
    }
    log::info!("wrote {} ({} frames)", path.display(), frames.len());
    Ok(())
}
