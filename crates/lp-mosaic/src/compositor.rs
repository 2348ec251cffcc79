use lp_core::frame::{FrameBuffer, GrayBuffer};
use lp_glyph::atlas::GlyphSource;
use lp_glyph::scale::LetterScale;
use rayon::prelude::*;

/// Paint a boxed intensity frame as a glyph mosaic.
///
/// For every cell the intensity `v` is inverted to `255 - v` before the
/// scale lookup: the scale measures ink density (more ink = higher score)
/// while pixels measure luminance (more light = higher value), so a dark
/// cell must pull a heavily inked glyph. Dropping this inversion produces
/// negatives.
///
/// The matched glyph's (2B)² alpha map is blitted at the cell origin with
/// per-pixel `max`, so descenders and wide strokes spill into neighbor
/// cells instead of being cut at the cell edge; spill past the raster is
/// clipped. The accumulated ink plane is then converted row-parallel to
/// RGBA over a white background.
#[must_use]
pub fn compose(boxed: &GrayBuffer, scale: &LetterScale, glyphs: &dyn GlyphSource) -> FrameBuffer {
    let b = glyphs.box_size();
    let side = b * 2;
    let out_w = boxed.width * b;
    let out_h = boxed.height * b;

    log::debug!("compositing {}×{} cells into {out_w}×{out_h}", boxed.width, boxed.height);

    let mut ink = vec![0u8; (out_w * out_h) as usize];
    for j in 0..boxed.height {
        for i in 0..boxed.width {
            let v = boxed.get(i, j);
            let entry = scale.get(scale.nearest(255 - v));
            let map = glyphs.alpha_map(entry.ch, entry.style);

            for gy in 0..side {
                let oy = j * b + gy;
                if oy >= out_h {
                    break;
                }
                let row = (oy * out_w) as usize;
                for gx in 0..side {
                    let ox = i * b + gx;
                    if ox >= out_w {
                        break;
                    }
                    let alpha = map[(gy * side + gx) as usize];
                    if alpha > 0 {
                        let idx = row + ox as usize;
                        ink[idx] = ink[idx].max(alpha);
                    }
                }
            }
        }
    }

    let mut out = FrameBuffer::new(out_w, out_h);
    out.data
        .par_chunks_exact_mut((out_w * 4) as usize)
        .zip(ink.par_chunks_exact(out_w as usize))
        .for_each(|(row, ink_row)| {
            for (px, &alpha) in row.chunks_exact_mut(4).zip(ink_row) {
                let v = 255 - alpha;
                px[0] = v;
                px[1] = v;
                px[2] = v;
                px[3] = 255;
            }
        });
    out
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

        fn put_map(&mut self, ch: char, style: GlyphStyle, map: Vec<u8>) {
            assert_eq!(map.len() as u32, self.box_size * self.box_size * 4);
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

    /// Map with a single inked pixel at (x, y).
    fn dot_map(box_size: u32, x: u32, y: u32, alpha: u8) -> Vec<u8> {
        let side = box_size * 2;
        let mut map = vec![0u8; (side * side) as usize];
        map[(y * side + x) as usize] = alpha;
        map
    }

    #[test]
    fn uniform_midgray_still_picks_the_nearest_variant() {
        // 26×26 of intensity 128, B=13, single-character alphabet.
        let b = 13;
        let mut glyphs = StubGlyphs::new(b);
        glyphs.put_map('A', GlyphStyle::Regular, dot_map(b, 0, 0, 10));
        glyphs.put_map('A', GlyphStyle::Bold, dot_map(b, 0, 0, 40));
        let scale = LetterScale::build("A", &glyphs).unwrap();
        // Normalized: Regular 10·255/40 = 63, Bold 255. Target 255-128 = 127
        // is 64 from Regular and 128 from Bold, so Regular wins every cell.
        assert_eq!(scale.entries()[scale.nearest(127)].style, GlyphStyle::Regular);

        let mut gray = GrayBuffer::new(26, 26);
        gray.data.fill(128);
        let boxed = crate::boxing::box_downsample(&gray, b);
        assert_eq!((boxed.width, boxed.height), (2, 2));

        let out = compose(&boxed, &scale, &glyphs);
        assert_eq!((out.width, out.height), (26, 26));
        // Every cell carries Regular's single dot of ink at its origin.
        for (cx, cy) in [(0, 0), (13, 0), (0, 13), (13, 13)] {
            assert_eq!(out.pixel(cx, cy), (245, 245, 245, 255));
        }
        // And paper everywhere else.
        assert_eq!(out.pixel(1, 0), (255, 255, 255, 255));
        assert_eq!(out.pixel(20, 20), (255, 255, 255, 255));
    }

    #[test]
    fn dark_cells_pull_inked_glyphs() {
        let b = 2;
        let mut glyphs = StubGlyphs::new(b);
        // '.' is nearly blank, '#' is saturated.
        glyphs.put_map('.', GlyphStyle::Regular, dot_map(b, 0, 0, 8));
        let mut heavy = vec![0u8; 16];
        for y in 0..b {
            for x in 0..b {
                heavy[(y * b * 2 + x) as usize] = 255;
            }
        }
        glyphs.put_map('#', GlyphStyle::Regular, heavy);
        let scale = LetterScale::build(".#", &glyphs).unwrap();

        // One black cell, one white cell.
        let mut boxed = GrayBuffer::new(2, 1);
        boxed.set(0, 0, 0);
        boxed.set(1, 0, 255);
        let out = compose(&boxed, &scale, &glyphs);

        // Black source cell gets '#' (full ink → black output pixels).
        assert_eq!(out.pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(out.pixel(1, 1), (0, 0, 0, 255));
        // White source cell gets the faintest glyph, not '#'.
        let (r, ..) = out.pixel(2, 0);
        assert!(r > 200, "white cell must stay near paper, got {r}");
    }

    #[test]
    fn overhanging_ink_spills_into_the_neighbor_cell() {
        let b = 2;
        let mut glyphs = StubGlyphs::new(b);
        // In-window ink at the origin plus a descender dot below the cell.
        let mut descender = dot_map(b, 0, 0, 255);
        descender[(3 * b * 2) as usize] = 200;
        glyphs.put_map('j', GlyphStyle::Regular, descender);
        let scale = LetterScale::build("j", &glyphs).unwrap();

        // Two black cells stacked vertically; both select 'j' Regular
        // (the bold twin is blank and sits at brightness 0).
        let boxed = GrayBuffer::new(1, 2);
        let out = compose(&boxed, &scale, &glyphs);
        assert_eq!((out.width, out.height), (2, 4));
        // Each cell origin carries full ink.
        assert_eq!(out.pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(out.pixel(0, 2), (0, 0, 0, 255));
        // Cell (0,0)'s descender lands inside cell (0,1)'s rows.
        assert_eq!(out.pixel(0, 3), (55, 55, 55, 255));
    }

    #[test]
    fn spill_past_the_raster_edge_is_clipped() {
        let b = 2;
        let mut glyphs = StubGlyphs::new(b);
        glyphs.put_map('x', GlyphStyle::Regular, dot_map(b, 0, 0, 50));
        // Bold carries more window ink plus a far-corner dot that lands
        // outside a 1×1 cell grid entirely.
        let mut map = dot_map(b, 0, 0, 60);
        map[(3 * b * 2 + 3) as usize] = 99;
        glyphs.put_map('x', GlyphStyle::Bold, map);
        let scale = LetterScale::build("x", &glyphs).unwrap();

        let boxed = GrayBuffer::new(1, 1);
        let out = compose(&boxed, &scale, &glyphs);
        // Black cell picks Bold (brightness 255); its (3,3) dot had
        // nowhere to land and was clipped, not wrapped.
        assert_eq!((out.width, out.height), (2, 2));
        assert_eq!(out.pixel(0, 0), (195, 195, 195, 255));
        assert_eq!(out.pixel(1, 1), (255, 255, 255, 255));
    }
}
