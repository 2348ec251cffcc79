use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use lp_core::frame::{AnimatedSequence, FrameBuffer, LoopBehavior, SequenceFrame};

/// Decode an animated GIF into ordered frames with per-frame delays.
///
/// Delays are carried in milliseconds. The decoder does not surface the
/// GIF loop extension, so sequences default to [`LoopBehavior::Infinite`].
///
/// # Errors
/// Returns an error if the file is unreadable, not a GIF, contains a
/// corrupt frame, or holds no frames at all.
pub fn decode_animation(path: &Path) -> Result<AnimatedSequence> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let decoder = GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("cannot decode GIF {}", path.display()))?;

    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = frame.with_context(|| format!("corrupt frame in {}", path.display()))?;
        let (numer, denom) = frame.delay().numer_denom_ms();
        let delay_ms = if denom == 0 { numer } else { numer / denom };
        let buffer = frame.into_buffer();
        let (width, height) = buffer.dimensions();
        frames.push(SequenceFrame {
            frame: FrameBuffer {
                data: buffer.into_raw(),
                width,
                height,
            },
            delay_ms,
        });
    }
    if frames.is_empty() {
        anyhow::bail!("no frames in {}", path.display());
    }
    log::info!("decoded {} frames from {}", frames.len(), path.display());

    Ok(AnimatedSequence {
        frames,
        looping: LoopBehavior::Infinite,
    })
}
