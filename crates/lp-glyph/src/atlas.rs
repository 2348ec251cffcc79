use std::collections::HashMap;

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};

/// Style variant of a rendered glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphStyle {
    /// Regular weight.
    Regular,
    /// Bold weight (separate font face).
    Bold,
}

/// Glyph rendering service.
///
/// Calibration and composition consume glyph pixels exclusively through
/// this trait, so a deterministic stub can stand in for a real font.
///
/// # Example
/// ```
/// use lp_glyph::atlas::{GlyphSource, GlyphStyle};
///
/// struct Blank([u8; 16]);
/// impl GlyphSource for Blank {
///     fn box_size(&self) -> u32 { 2 }
///     fn alpha_map(&self, _ch: char, _style: GlyphStyle) -> &[u8] { &self.0 }
/// }
/// ```
pub trait GlyphSource: Sync {
    /// Cell size the alpha maps were rasterized for.
    fn box_size(&self) -> u32;

    /// Alpha-coverage buffer for (`ch`, `style`): (2B)×(2B) row-major,
    /// glyph drawn in black ink at x = 0 with its baseline at y = B.
    /// Characters without coverage yield an all-zero map.
    fn alpha_map(&self, ch: char, style: GlyphStyle) -> &[u8];
}

/// Pixel scale for a glyph cell: `(box_size - 2) * dpi / 72`, truncating.
///
/// The resolution constant is configuration, never a display query, so
/// calibration is reproducible across machines.
///
/// # Example
/// ```
/// use lp_glyph::atlas::point_size;
/// assert_eq!(point_size(13, 96), 14.0);
/// ```
#[must_use]
pub fn point_size(box_size: u32, dpi: u32) -> f32 {
    (box_size.saturating_sub(2) * dpi / 72) as f32
}

/// Pre-rasterized glyph cache over two font faces.
///
/// Every (character, style) pair of the alphabet is drawn once at
/// construction; lookups in the hot loop are map reads only.
pub struct GlyphAtlas {
    box_size: u32,
    /// Buffer side, `2 * box_size`.
    side: u32,
    maps: HashMap<(char, GlyphStyle), Vec<u8>>,
    /// Shared fallback for characters outside the alphabet.
    blank: Vec<u8>,
}

impl GlyphAtlas {
    /// Rasterize `alphabet` in both styles from raw font file bytes.
    ///
    /// # Errors
    /// Returns an error if either font fails to parse.
    pub fn new(
        regular: Vec<u8>,
        bold: Vec<u8>,
        alphabet: &str,
        box_size: u32,
        dpi: u32,
    ) -> Result<Self> {
        let regular = FontVec::try_from_vec(regular).context("invalid regular font data")?;
        let bold = FontVec::try_from_vec(bold).context("invalid bold font data")?;

        let side = box_size * 2;
        let scale = PxScale::from(point_size(box_size, dpi));

        let mut maps = HashMap::new();
        for ch in alphabet.chars() {
            maps.insert(
                (ch, GlyphStyle::Regular),
                rasterize(&regular, ch, scale, side, box_size),
            );
            maps.insert(
                (ch, GlyphStyle::Bold),
                rasterize(&bold, ch, scale, side, box_size),
            );
        }
        log::debug!(
            "atlas: {} alpha maps at {}px for cell {box_size}",
            maps.len(),
            scale.y
        );

        Ok(Self {
            box_size,
            side,
            maps,
            blank: vec![0u8; (side * side) as usize],
        })
    }
}

impl GlyphSource for GlyphAtlas {
    fn box_size(&self) -> u32 {
        self.box_size
    }

    fn alpha_map(&self, ch: char, style: GlyphStyle) -> &[u8] {
        self.maps.get(&(ch, style)).unwrap_or(&self.blank)
    }
}

/// Draw one glyph into a fresh `side`×`side` alpha buffer, baseline at
/// y = `baseline`, origin at x = 0.
fn rasterize(font: &FontVec, ch: char, scale: PxScale, side: u32, baseline: u32) -> Vec<u8> {
    let mut buffer = vec![0u8; (side * side) as usize];

    let glyph = font
        .glyph_id(ch)
        .with_scale_and_position(scale, point(0.0, baseline as f32));

    if let Some(outline) = font.outline_glyph(glyph) {
        let bounds = outline.px_bounds();
        #[allow(clippy::cast_possible_wrap)]
        outline.draw(|x, y, v| {
            let px = x as i32 + bounds.min.x as i32;
            let py = y as i32 + bounds.min.y as i32;
            if px >= 0 && py >= 0 && (px as u32) < side && (py as u32) < side {
                let idx = (py as u32 * side + px as u32) as usize;
                buffer[idx] = buffer[idx].max((v * 255.0).round() as u8);
            }
        });
    }
    buffer
}
