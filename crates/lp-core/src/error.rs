use thiserror::Error;

/// Errors raised before or during a conversion run.
///
/// All variants are fatal: a run either completes in full or produces
/// nothing.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Every glyph in the alphabet calibrated to zero ink coverage,
    /// leaving no brightness span to normalize against.
    #[error("degenerate letter scale: all glyphs rasterized to zero coverage")]
    DegenerateScale,

    /// Source frame smaller than one glyph cell.
    #[error("frame {width}×{height} is smaller than one {box_size}×{box_size} cell")]
    InvalidDimensions {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Configured cell size.
        box_size: u32,
    },
}
