use std::path::Path;

use anyhow::{Context, Result};
use lp_core::CoreError;
use lp_core::config::MosaicConfig;
use lp_core::frame::{FrameBuffer, SequenceFrame};
use lp_glyph::atlas::GlyphSource;
use lp_glyph::scale::LetterScale;
use lp_mosaic::{boxing, compositor, luminance};
use rayon::prelude::*;

/// Run one frame through the full conversion: grayscale, optional
/// upscale, dimension guard, boxing, glyph composition.
fn frame_to_mosaic(
    frame: &FrameBuffer,
    scale: &LetterScale,
    glyphs: &dyn GlyphSource,
    upscale: Option<f32>,
) -> Result<FrameBuffer> {
    let mut gray = luminance::to_gray(frame);
    if let Some(factor) = upscale {
        gray = lp_source::rescale::upscale_gray(&gray, factor)?;
    }

    let box_size = glyphs.box_size();
    if gray.width < box_size || gray.height < box_size {
        return Err(CoreError::InvalidDimensions {
            width: gray.width,
            height: gray.height,
            box_size,
        }
        .into());
    }

    let boxed = boxing::box_downsample(&gray, box_size);
    Ok(compositor::compose(&boxed, scale, glyphs))
}

/// Convert a still image and write it to `output`.
///
/// # Errors
/// Propagates decode, configuration, and encode failures; nothing is
/// written unless composition succeeded in full.
pub fn convert_still(
    input: &Path,
    output: &Path,
    scale: &LetterScale,
    glyphs: &dyn GlyphSource,
) -> Result<()> {
    let frame = lp_source::image::load_still(input).context("decoding still image")?;
    let mosaic = frame_to_mosaic(&frame, scale, glyphs, None)?;
    lp_export::image::save_still(output, &mosaic).context("encoding still image")
}

/// Convert every frame of an animated GIF and write the result to
/// `output`, preserving per-frame delays and loop behavior.
///
/// Sources smaller than `config.min_pixel_target` total pixels are
/// upscaled by `sqrt(target / pixel_count)` before boxing. Frames are
/// processed in parallel against the immutable scale and encoded in
/// order.
///
/// # Errors
/// Propagates decode, configuration, and encode failures; a failed run
/// leaves no valid output.
pub fn convert_animation(
    input: &Path,
    output: &Path,
    scale: &LetterScale,
    glyphs: &dyn GlyphSource,
    config: &MosaicConfig,
) -> Result<()> {
    let sequence = lp_source::gif::decode_animation(input).context("decoding animation")?;
    let first = sequence.frames.first().context("animation has no frames")?;

    let pixel_count = u64::from(first.frame.width) * u64::from(first.frame.height);
    let factor = (config.min_pixel_target as f64 / pixel_count as f64).sqrt() as f32;
    let upscale = (factor > 1.0).then_some(factor);
    if let Some(f) = upscale {
        log::info!("source below pixel target, upscaling frames by {f:.2}");
    }

    let rendered = sequence
        .frames
        .par_iter()
        .map(|sf| {
            let mosaic = frame_to_mosaic(&sf.frame, scale, glyphs, upscale)?;
            Ok(SequenceFrame {
                frame: mosaic,
                delay_ms: sf.delay_ms,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    lp_export::gif::encode_animation(output, &rendered, sequence.looping, config.gif_speed)
        .context("encoding animation")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lp_glyph::atlas::GlyphStyle;

    use super::*;

    struct StubGlyphs {
        box_size: u32,
        maps: HashMap<(char, GlyphStyle), Vec<u8>>,
        blank: Vec<u8>,
    }

    impl StubGlyphs {
        fn new(box_size: u32) -> Self {
            let side = box_size * 2;
            Self {
                box_size,
                maps: HashMap::new(),
                blank: vec![0u8; (side * side) as usize],
            }
        }

        /// Uniform window ink of the given alpha.
        fn put_flat(&mut self, ch: char, style: GlyphStyle, alpha: u8) {
            let side = self.box_size * 2;
            let mut map = vec![0u8; (side * side) as usize];
            for y in 0..self.box_size {
                for x in 0..self.box_size {
                    map[(y * side + x) as usize] = alpha;
                }
            }
            self.maps.insert((ch, style), map);
        }
    }

    impl GlyphSource for StubGlyphs {
        fn box_size(&self) -> u32 {
            self.box_size
        }
        fn alpha_map(&self, ch: char, style: GlyphStyle) -> &[u8] {
            self.maps.get(&(ch, style)).unwrap_or(&self.blank)
        }
    }

    fn stub_setup() -> (StubGlyphs, LetterScale) {
        let mut glyphs = StubGlyphs::new(4);
        glyphs.put_flat('.', GlyphStyle::Regular, 16);
        glyphs.put_flat('#', GlyphStyle::Regular, 240);
        let scale = LetterScale::build(".#", &glyphs).unwrap();
        (glyphs, scale)
    }

    #[test]
    fn still_image_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");

        // 8×8 black input, B=4 → 2×2 cells of the heaviest glyph.
        let mut frame = FrameBuffer::new(8, 8);
        for px in frame.data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        lp_export::image::save_still(&input, &frame).unwrap();

        let (glyphs, scale) = stub_setup();
        convert_still(&input, &output, &scale, &glyphs).unwrap();

        let result = lp_source::image::load_still(&output).unwrap();
        assert_eq!((result.width, result.height), (8, 8));
        // '#' ink 240 over white: every cell pixel reads 255 − 240 = 15.
        assert_eq!(result.pixel(0, 0), (15, 15, 15, 255));
        assert_eq!(result.pixel(7, 7), (15, 15, 15, 255));
    }

    #[test]
    fn undersized_frame_is_rejected_before_boxing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");

        let mut frame = FrameBuffer::new(3, 3);
        for px in frame.data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        lp_export::image::save_still(&input, &frame).unwrap();

        let (glyphs, scale) = stub_setup();
        let err = convert_still(&input, &output, &scale, &glyphs).unwrap_err();
        assert!(err.downcast_ref::<CoreError>().is_some());
        assert!(!output.exists(), "no partial output on failure");
    }

    #[test]
    fn animation_end_to_end_preserves_timing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gif");
        let output = dir.path().join("out.gif");

        let make = |value: u8, delay_ms: u32| {
            let mut frame = FrameBuffer::new(8, 8);
            for px in frame.data.chunks_exact_mut(4) {
                px[0] = value;
                px[1] = value;
                px[2] = value;
                px[3] = 255;
            }
            SequenceFrame { frame, delay_ms }
        };
        lp_export::gif::encode_animation(
            &input,
            &[make(0, 120), make(255, 60)],
            lp_core::frame::LoopBehavior::Infinite,
            12,
        )
        .unwrap();

        let (glyphs, scale) = stub_setup();
        // Keep the tiny fixture below the upscale trigger.
        let config = MosaicConfig {
            min_pixel_target: 1,
            ..MosaicConfig::default()
        };
        convert_animation(&input, &output, &scale, &glyphs, &config).unwrap();

        let result = lp_source::gif::decode_animation(&output).unwrap();
        assert_eq!(result.frames.len(), 2);
        assert_eq!(result.frames[0].delay_ms, 120);
        assert_eq!(result.frames[1].delay_ms, 60);
        assert_eq!(result.frames[0].frame.width, 8);
    }

    #[test]
    fn small_animation_is_upscaled_to_the_pixel_target() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gif");
        let output = dir.path().join("out.gif");

        let mut frame = FrameBuffer::new(8, 8);
        for px in frame.data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        lp_export::gif::encode_animation(
            &input,
            &[SequenceFrame { frame, delay_ms: 100 }],
            lp_core::frame::LoopBehavior::Infinite,
            12,
        )
        .unwrap();

        let (glyphs, scale) = stub_setup();
        // 64 pixels against a 256-pixel target → factor 2 → 16×16 gray
        // plane → 4×4 cells → 16×16 output raster.
        let config = MosaicConfig {
            min_pixel_target: 256,
            ..MosaicConfig::default()
        };
        convert_animation(&input, &output, &scale, &glyphs, &config).unwrap();

        let result = lp_source::gif::decode_animation(&output).unwrap();
        assert_eq!(result.frames[0].frame.width, 16);
        assert_eq!(result.frames[0].frame.height, 16);
    }
}
