use std::path::PathBuf;

use clap::Parser;

/// letterpix — repaint images and GIFs with calibrated letter glyphs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source image: PNG, JPEG, BMP, or animated GIF.
    pub input: PathBuf,

    /// Destination path. A `.gif` extension selects the animated
    /// pipeline; anything else writes a still image in the extension's
    /// format.
    pub output: PathBuf,

    /// Regular font file (TTF/OTF). Overrides the configured font.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Bold font file. Falls back to the regular face when absent.
    #[arg(long)]
    pub font_bold: Option<PathBuf>,

    /// TOML configuration file. Defaults are used when it does not exist.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Override the configured alphabet.
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Override the configured cell size in pixels.
    #[arg(long)]
    pub box_size: Option<u32>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// True when the destination asks for the animated pipeline.
    #[must_use]
    pub fn wants_animation(&self) -> bool {
        self.output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
    }
}
