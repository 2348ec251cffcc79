use crate::atlas::{GlyphSource, GlyphStyle};

/// Raw ink-coverage score of one glyph: the sum of alpha over the B×B
/// sampling window anchored at the buffer origin.
///
/// The window deliberately covers only a quarter of the (2B)² buffer —
/// ink past the cell boundary belongs to neighboring cells at composition
/// time and must not inflate the score. More ink means a higher score;
/// the pipeline treats that as "brighter" on its inverted ink scale.
///
/// # Example
/// ```
/// use lp_glyph::atlas::{GlyphSource, GlyphStyle};
/// use lp_glyph::calibrate::raw_brightness;
///
/// struct Uniform(Vec<u8>);
/// impl GlyphSource for Uniform {
///     fn box_size(&self) -> u32 { 2 }
///     fn alpha_map(&self, _ch: char, _style: GlyphStyle) -> &[u8] { &self.0 }
/// }
///
/// let src = Uniform(vec![10u8; 16]);
/// // 2×2 window over a uniform alpha of 10.
/// assert_eq!(raw_brightness(&src, 'a', GlyphStyle::Regular), 40);
/// ```
#[must_use]
pub fn raw_brightness(glyphs: &dyn GlyphSource, ch: char, style: GlyphStyle) -> u64 {
    let b = glyphs.box_size();
    let side = b * 2;
    let map = glyphs.alpha_map(ch, style);
    debug_assert_eq!(map.len() as u32, side * side, "alpha map size mismatch");

    let mut sum = 0u64;
    for y in 0..b {
        for x in 0..b {
            sum += u64::from(map[(y * side + x) as usize]);
        }
    }
    sum
}
