use lp_core::CoreError;

use crate::atlas::{GlyphSource, GlyphStyle};
use crate::calibrate::raw_brightness;

/// One calibrated (character, style) pair before normalization.
///
/// `brightness` is the unbounded raw ink-coverage sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawGlyph {
    /// The character.
    pub ch: char,
    /// Style it was rasterized in.
    pub style: GlyphStyle,
    /// Raw ink coverage.
    pub brightness: u64,
}

/// One calibrated (character, style) pair after normalization.
///
/// `brightness` is on the 0–255 scale; the type makes out-of-range
/// values unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphEntry {
    /// The character.
    pub ch: char,
    /// Style to render it in.
    pub style: GlyphStyle,
    /// Normalized brightness.
    pub brightness: u8,
}

/// Rescale a brightness-sorted slice of raw entries onto 0–255.
///
/// Pure transform: same length, same order, each brightness divided by
/// the maximum entry's raw value (truncating). The input is never
/// mutated. The last entry always normalizes to exactly 255.
///
/// # Errors
/// [`CoreError::Config`] on an empty slice, [`CoreError::DegenerateScale`]
/// when the maximum raw value is zero (nothing to divide by).
pub fn normalize_sorted(sorted: &[RawGlyph]) -> Result<Vec<GlyphEntry>, CoreError> {
    let Some(last) = sorted.last() else {
        return Err(CoreError::Config("cannot normalize an empty scale".into()));
    };
    let factor = last.brightness;
    if factor == 0 {
        return Err(CoreError::DegenerateScale);
    }

    Ok(sorted
        .iter()
        .map(|raw| GlyphEntry {
            ch: raw.ch,
            style: raw.style,
            brightness: (raw.brightness * 255 / factor) as u8,
        })
        .collect())
}

/// The calibrated alphabet: glyph entries sorted ascending by normalized
/// brightness.
///
/// Built once per run and immutable afterwards; frame workers share it by
/// reference.
///
/// # Example
/// ```
/// use lp_glyph::atlas::GlyphStyle;
/// use lp_glyph::scale::{GlyphEntry, LetterScale};
///
/// let scale = LetterScale::from_entries(vec![
///     GlyphEntry { ch: 'a', style: GlyphStyle::Regular, brightness: 100 },
///     GlyphEntry { ch: 'b', style: GlyphStyle::Bold, brightness: 110 },
/// ]).unwrap();
/// // Equidistant target: the lower entry wins the tie.
/// assert_eq!(scale.nearest(105), 0);
/// ```
pub struct LetterScale {
    entries: Vec<GlyphEntry>,
}

impl LetterScale {
    /// Calibrate `alphabet` against `glyphs` and build the normalized
    /// scale: one Regular pass, one Bold pass, sorted by raw brightness,
    /// rescaled onto 0–255.
    ///
    /// The result always has exactly `2 × |alphabet|` entries.
    ///
    /// # Errors
    /// [`CoreError::Config`] for an empty alphabet,
    /// [`CoreError::DegenerateScale`] when every glyph scores zero.
    pub fn build(alphabet: &str, glyphs: &dyn GlyphSource) -> Result<Self, CoreError> {
        if alphabet.is_empty() {
            return Err(CoreError::Config("alphabet is empty".into()));
        }

        let mut raw = Vec::with_capacity(alphabet.chars().count() * 2);
        for style in [GlyphStyle::Regular, GlyphStyle::Bold] {
            for ch in alphabet.chars() {
                raw.push(RawGlyph {
                    ch,
                    style,
                    brightness: raw_brightness(glyphs, ch, style),
                });
            }
        }

        // Stable sort on the numeric key; ties keep calibration order but
        // nothing downstream depends on that.
        raw.sort_by_key(|g| g.brightness);

        let entries = normalize_sorted(&raw)?;
        log::debug!(
            "letter scale: {} entries, darkest {} brightest {}",
            entries.len(),
            entries[0].brightness,
            entries[entries.len() - 1].brightness
        );
        Ok(Self { entries })
    }

    /// Build a scale from already-normalized entries, restoring the sort
    /// invariant. Intended for tests and tooling.
    ///
    /// # Errors
    /// [`CoreError::Config`] if `entries` is empty.
    pub fn from_entries(mut entries: Vec<GlyphEntry>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::Config("scale needs at least one entry".into()));
        }
        entries.sort_by_key(|e| e.brightness);
        Ok(Self { entries })
    }

    /// Entries in ascending brightness order.
    #[must_use]
    pub fn entries(&self) -> &[GlyphEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built scale.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> &GlyphEntry {
        &self.entries[index]
    }

    /// Index of the entry whose brightness is closest to `target`.
    ///
    /// Binary search; an exact hit returns that entry (any one among
    /// duplicates). On a miss the two neighbors compete and the lower one
    /// wins exact ties. Targets beyond the scale's extremes clamp to the
    /// first or last entry.
    #[must_use]
    pub fn nearest(&self, target: u8) -> usize {
        match self
            .entries
            .binary_search_by_key(&target, |e| e.brightness)
        {
            Ok(idx) => idx,
            Err(0) => 0,
            Err(idx) if idx == self.entries.len() => idx - 1,
            Err(idx) => {
                let above = i32::from(self.entries[idx].brightness) - i32::from(target);
                let below = i32::from(target) - i32::from(self.entries[idx - 1].brightness);
                if above - below < 0 { idx } else { idx - 1 }
            }
        }
    }
}
