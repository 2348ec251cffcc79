use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use lp_core::config::MosaicConfig;
use lp_glyph::atlas::GlyphAtlas;
use lp_glyph::scale::LetterScale;

mod cli;
mod pipeline;

fn main() -> Result<()> {
    // 1. Parse CLI
    let cli = cli::Cli::parse();

    // 2. Initialize logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Resolve config and apply CLI overrides
    let config = resolve_config(&cli)?;
    config.validate()?;

    // 4. Build the glyph atlas and the letter scale, once per run
    let (regular, bold) = load_fonts(&config)?;
    let atlas = GlyphAtlas::new(regular, bold, &config.alphabet, config.box_size, config.dpi)?;
    let scale = LetterScale::build(&config.alphabet, &atlas)?;
    log::info!(
        "calibrated {} glyphs for cell size {}",
        scale.len(),
        config.box_size
    );

    // 5. Dispatch on the requested output
    if cli.wants_animation() {
        pipeline::convert_animation(&cli.input, &cli.output, &scale, &atlas, &config)
    } else {
        pipeline::convert_still(&cli.input, &cli.output, &scale, &atlas)
    }
}

/// Load the config file if it exists, fall back to defaults otherwise,
/// then fold in CLI overrides.
fn resolve_config(cli: &cli::Cli) -> Result<MosaicConfig> {
    let mut config = if cli.config.exists() {
        lp_core::config::load_config(&cli.config)?
    } else {
        log::warn!(
            "config not found: {}, using defaults",
            cli.config.display()
        );
        MosaicConfig::default()
    };

    if let Some(ref alphabet) = cli.alphabet {
        config.alphabet = alphabet.clone();
    }
    if let Some(box_size) = cli.box_size {
        config.box_size = box_size;
    }
    if cli.font.is_some() {
        config.font = cli.font.clone();
    }
    if cli.font_bold.is_some() {
        config.font_bold = cli.font_bold.clone();
    }
    config.clamp_all();
    Ok(config)
}

/// Read font bytes for both styles. The bold face falls back to the
/// regular one, which degrades to duplicate brightness entries.
fn load_fonts(config: &MosaicConfig) -> Result<(Vec<u8>, Vec<u8>)> {
    let regular_path = config
        .font
        .as_deref()
        .context("no regular font configured; pass --font or set [fonts].regular")?;
    let regular = read_font(regular_path)?;

    let bold = match config.font_bold.as_deref() {
        Some(path) => read_font(path)?,
        None => {
            log::warn!("no bold font configured, reusing the regular face");
            regular.clone()
        }
    };
    Ok((regular, bold))
}

fn read_font(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read font {}", path.display()))
}
