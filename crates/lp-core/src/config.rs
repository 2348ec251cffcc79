use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::alphabet;
use crate::error::CoreError;

/// Complete conversion configuration.
///
/// Serializable to TOML. Every field has a sane default.
///
/// # Example
/// ```
/// use lp_core::config::MosaicConfig;
/// let config = MosaicConfig::default();
/// assert_eq!(config.box_size, 13);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MosaicConfig {
    // === Mosaic ===
    /// Characters to calibrate. Each is rendered twice (regular + bold).
    pub alphabet: String,
    /// Side of the square source region mapped to one glyph, in pixels.
    pub box_size: u32,
    /// Font sizing resolution constant, dots per inch. The glyph pixel
    /// size is `(box_size - 2) * dpi / 72`.
    pub dpi: u32,

    // === Animation ===
    /// Animated sources below this total pixel count are upscaled before
    /// boxing, so the glyph grid does not collapse on small GIFs.
    pub min_pixel_target: u64,
    /// GIF encoder speed hint, 1–30. Lower is slower and higher quality.
    pub gif_speed: i32,

    // === Fonts ===
    /// Regular font file (TTF/OTF).
    pub font: Option<PathBuf>,
    /// Bold font file. Falls back to the regular face when absent.
    pub font_bold: Option<PathBuf>,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            alphabet: alphabet::ALPHABET_BASIC.to_string(),
            box_size: 13,
            dpi: 96,
            min_pixel_target: 1_100_000,
            gif_speed: 12,
            font: None,
            font_bold: None,
        }
    }
}

impl MosaicConfig {
    /// Clamp soft numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_all(&mut self) {
        self.gif_speed = self.gif_speed.clamp(1, 30);
    }

    /// Reject configurations no run can proceed from.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for an empty alphabet, a zero cell
    /// size, or a zero resolution constant.
    pub fn validate(&self) -> std::result::Result<(), CoreError> {
        if self.alphabet.is_empty() {
            return Err(CoreError::Config("alphabet is empty".into()));
        }
        if self.box_size == 0 {
            return Err(CoreError::Config("box_size must be positive".into()));
        }
        if self.dpi == 0 {
            return Err(CoreError::Config("dpi must be positive".into()));
        }
        Ok(())
    }
}

/// Optional-field mirror of [`MosaicConfig`] for partial TOML files.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    mosaic: MosaicSection,
    animation: Option<AnimationSection>,
    fonts: Option<FontsSection>,
}

#[derive(Default, Deserialize)]
struct MosaicSection {
    alphabet: Option<String>,
    box_size: Option<u32>,
    dpi: Option<u32>,
}

#[derive(Deserialize)]
struct AnimationSection {
    min_pixel_target: Option<u64>,
    gif_speed: Option<i32>,
}

#[derive(Deserialize)]
struct FontsSection {
    regular: Option<PathBuf>,
    bold: Option<PathBuf>,
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use lp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<MosaicConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("TOML parse error in {}", path.display()))
}

/// Merge TOML `content` over the defaults.
///
/// # Errors
/// Returns an error if the content is not valid TOML.
pub fn parse_config(content: &str) -> Result<MosaicConfig> {
    let file: ConfigFile = toml::from_str(content)?;

    let mut config = MosaicConfig::default();

    let m = file.mosaic;
    if let Some(v) = m.alphabet {
        config.alphabet = v;
    }
    if let Some(v) = m.box_size {
        config.box_size = v;
    }
    if let Some(v) = m.dpi {
        config.dpi = v;
    }

    if let Some(a) = file.animation {
        if let Some(v) = a.min_pixel_target {
            config.min_pixel_target = v;
        }
        if let Some(v) = a.gif_speed {
            config.gif_speed = v;
        }
    }

    if let Some(f) = file.fonts {
        if f.regular.is_some() {
            config.font = f.regular;
        }
        if f.bold.is_some() {
            config.font_bold = f.bold;
        }
    }

    config.clamp_all();
    Ok(config)
}
